//! System prompt construction for the analysis agent
//!
//! The prompt gives the agent its working context: the dataset it operates
//! on, how to resolve conversational references, and which response format
//! to pick. Visualisation and plain-language guidance are appended only
//! when the corresponding settings are enabled.

use crate::agent::manager::AgentSettings;
use crate::data::Table;

/// Build the system prompt for a dataset and settings.
#[must_use]
pub fn build_prompt(table: &Table, settings: &AgentSettings) -> String {
    let mut prompt = format!(
        "You are a helpful data analysis assistant working with a pandas dataframe \
         named `df`: {}.\n\
         When users refer to \"this\", \"it\", \"that\", or similar pronouns, they are \
         typically referring to the data or results from their previous question, a \
         specific column, chart, or analysis they mentioned earlier, or the same data \
         subset from the previous operation. Pay attention to the conversation context \
         to understand what the user is referring to.\n\n\
         Choose the most appropriate response format for the question:\n\
         - Single number/statistic: for counts, averages, totals, percentages, or \
         specific calculated values\n\
         - Markdown table: for comparisons, summaries, grouped data, or multiple \
         related values\n",
        table.summary()
    );

    if settings.include_visualisations {
        prompt.push_str(
            "- Seaborn plot: for trends, distributions, relationships, or patterns \
             where a visual representation is most informative. Use seaborn for all \
             plots.\n",
        );
    }

    if settings.simple_language {
        prompt.push_str(
            "\nExplain your answers in simple, everyday language. Avoid statistical \
             jargon; when a technical term is unavoidable, explain it briefly.\n",
        );
    }

    prompt
}
