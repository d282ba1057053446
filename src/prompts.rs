//! Prompt construction for the two quiz variants.
//!
//! Both prompts pin the reply format the parser in [`crate::quiz`] expects:
//! comma-delimited lines of `question, A, B, C, D, answer`. The grounded
//! variant additionally requests a header row, which the parser discards.

/// Prompt for a quiz grounded in scraped source text.
///
/// Asks for more rows than the CSV keeps so malformed lines do not shrink
/// the final quiz below its fixed length.
pub fn grounded_prompt(source_text: &str) -> String {
    format!(
        "Generate 10 quiz questions based on the following text extracted from \
         significant news topics.\n\
         \n\
         Ensure that the questions are relevant to the SSC exams and framed to \
         encourage critical thinking.\n\
         \n\
         All questions must be based on the text provided below:\n\
         \n\
         Text: {source_text}\n\
         \n\
         The questions should cover a range of topics, including politics, economy, \
         environment, and social issues.\n\
         \n\
         Also the options must be logical with the questions.\n\
         \n\
         Answer must be from [A, B, C, D]\n\
         \n\
         Output must be a csv with headers: \"question, A, B, C, D, answer\"."
    )
}

/// Prompt for a quiz keyed only to a date, with no source text.
pub fn daily_prompt(date: &str) -> String {
    format!(
        "Generate 10 quiz questions based on significant news in India from {date}.\n\
         Ensure that the questions are relevant, factually accurate, and tailored \
         for UPSC exams.\n\
         Each question should have four options (A, B, C, D) and specify the \
         correct answer.\n\
         Format each output line as: \"Question, A, B, C, D, CorrectAnswer\".\n\
         If you cannot provide factual information, state that instead of \
         providing placeholders."
    )
}
