mod categories;
mod questions;
mod quizzes;

pub use categories::{category_index, category_router};
pub use questions::questions_router;
pub use quizzes::quiz_router;
