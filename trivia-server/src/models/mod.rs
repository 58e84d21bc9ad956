//! Domain models with validation at construction
//!
//! Client input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod category;
pub mod question;
pub mod pagination;
pub mod quiz;

pub use validation::ValidationError;
pub use category::{category_map, Category, CategoryMap};
pub use question::{IntOrString, NewQuestion, Question, MAX_DIFFICULTY, MIN_DIFFICULTY};
pub use pagination::{paginate, PageParams, Pagination, DEFAULT_PAGE_SIZE};
pub use quiz::{pick_question, QuizCategory, QuizPick, ALL_CATEGORIES};
