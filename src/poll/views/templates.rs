//! Page templates and the view models rendered into them.

use super::Route;
use crate::poll::domain::{Choice, Question};
use minijinja::{Environment, context};
use serde::Serialize;

/// Template name of the listing page.
pub const INDEX_TEMPLATE: &str = "polls/index.html";
/// Template name of the voting form.
pub const DETAIL_TEMPLATE: &str = "polls/detail.html";
/// Template name of the results page.
pub const RESULTS_TEMPLATE: &str = "polls/results.html";

const INDEX_SOURCE: &str = r#"{% if latest_question_list %}
<ul>
{% for question in latest_question_list %}
    <li><a href="{{ question.detail_url }}">{{ question.text }}</a></li>
{% endfor %}
</ul>
{% else %}
<p>No polls are available.</p>
{% endif %}
"#;

const DETAIL_SOURCE: &str = r#"<form action="{{ question.vote_url }}" method="post">
<fieldset>
    <legend><h1>{{ question.text }}</h1></legend>
    {% if error_message %}<p><strong>{{ error_message }}</strong></p>{% endif %}
    {% for choice in question.choices %}
    <input type="radio" name="choice" id="choice{{ loop.index }}" value="{{ choice.id }}">
    <label for="choice{{ loop.index }}">{{ choice.text }}</label><br>
    {% endfor %}
</fieldset>
<input type="submit" value="Vote">
</form>
"#;

const RESULTS_SOURCE: &str = r#"<h1>{{ question.text }}</h1>

<ul>
{% for choice in question.choices %}
    <li>{{ choice.text }} -- {{ choice.votes }} vote{% if choice.votes != 1 %}s{% endif %}</li>
{% endfor %}
</ul>

<a href="{{ question.detail_url }}">Vote again?</a>
"#;

/// Template-facing view of a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// Choice identifier, as submitted by the voting form.
    pub id: String,
    /// Answer label.
    pub text: String,
    /// Vote tally.
    pub votes: u32,
}

impl From<&Choice> for ChoiceView {
    fn from(choice: &Choice) -> Self {
        Self {
            id: choice.id().to_string(),
            text: choice.text().as_str().to_owned(),
            votes: choice.votes(),
        }
    }
}

/// Template-facing view of a question and its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// Question identifier.
    pub id: String,
    /// Prompt text.
    pub text: String,
    /// Path of the voting form.
    pub detail_url: String,
    /// Path of the results page.
    pub results_url: String,
    /// Path the voting form posts to.
    pub vote_url: String,
    /// Choices in creation order.
    pub choices: Vec<ChoiceView>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        let id = question.id();
        Self {
            id: id.to_string(),
            text: question.text().as_str().to_owned(),
            detail_url: Route::Detail(id).path(),
            results_url: Route::Results(id).path(),
            vote_url: Route::Vote(id).path(),
            choices: question.choices().iter().map(ChoiceView::from).collect(),
        }
    }
}

/// Compiled poll page templates.
#[derive(Debug)]
pub struct PollTemplates {
    env: Environment<'static>,
}

impl PollTemplates {
    /// Compiles the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] when a template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, INDEX_SOURCE)?;
        env.add_template(DETAIL_TEMPLATE, DETAIL_SOURCE)?;
        env.add_template(RESULTS_TEMPLATE, RESULTS_SOURCE)?;
        Ok(Self { env })
    }

    /// Renders the listing page.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] when rendering fails.
    pub fn render_index(&self, questions: &[Question]) -> Result<String, minijinja::Error> {
        let latest_question_list: Vec<QuestionView> =
            questions.iter().map(QuestionView::from).collect();
        self.env
            .get_template(INDEX_TEMPLATE)?
            .render(context! { latest_question_list })
    }

    /// Renders the voting form, optionally with an error message.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] when rendering fails.
    pub fn render_detail(
        &self,
        question: &Question,
        error_message: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        let question = QuestionView::from(question);
        self.env
            .get_template(DETAIL_TEMPLATE)?
            .render(context! { question, error_message })
    }

    /// Renders the results page.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] when rendering fails.
    pub fn render_results(&self, question: &Question) -> Result<String, minijinja::Error> {
        let question = QuestionView::from(question);
        self.env
            .get_template(RESULTS_TEMPLATE)?
            .render(context! { question })
    }
}
