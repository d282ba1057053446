//! Output writers.
//!
//! # Output Structure
//!
//! ```text
//! data/
//! ├── 2025/
//! │   └── week_2_2025.txt                  # weekly article log (weeklog)
//! ├── quiz_questions_2025-01-06.csv        # grounded quiz
//! └── upsc_quiz_questions_2025-01-06.csv   # date-only quiz
//! ```
//!
//! The weekly log writer lives in [`crate::weeklog`] next to its
//! de-duplication logic; this module covers the quiz CSV.

pub mod quiz_csv;
