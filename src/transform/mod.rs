//! Customer transformation stages
//!
//! Each stage is a [`Transformer`](crate::etl::Transformer) and can be used
//! on its own; [`CustomerTransformer`] chains them in the required order.

mod classifier;
mod customer;
mod projector;
mod recoder;

pub use classifier::TenureClassifier;
pub use customer::{CustomerTransformer, DEFAULT_ROW_LIMIT, transform};
pub use projector::Projector;
pub use recoder::{BooleanRecoder, recode_flag, recode_yes_no};
