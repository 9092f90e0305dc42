//! TypeScript binding generation.

pub mod ast;
pub mod builder;
pub mod declarations;
pub mod emit;
pub mod helpers;
pub mod mapper;
pub mod names;
pub mod queries;
pub mod shapes;

pub use builder::DeclarationBuilder;
pub use declarations::{DeclarationSet, GroupKind};
pub use emit::{Emit, Emitter};
pub use helpers::HelperGenerator;
pub use mapper::{MappedType, TypeMapper};
pub use queries::QueryGenerator;
pub use shapes::ShapeGenerator;
