// ── Network form ──
//
// Mutation (`reducer`) and derivation (`visibility`) are separate,
// independently testable stages. `mapper` converts between the flat form
// and the daemon's nested model; `session` ties them to a section and
// the YAML editor.

pub mod field;
pub mod mapper;
pub mod reducer;
pub mod session;
pub mod validate;
pub mod values;
pub mod visibility;

pub use field::{FieldId, FieldKind, Section};
pub use mapper::{from_remote_model, to_remote_model};
pub use reducer::{FormEdit, reduce};
pub use session::FormSession;
pub use validate::{FieldError, validate};
pub use values::{NetworkFormValues, UserPair};
pub use visibility::{FieldState, FormRender, TypeOption, field_states, type_options, visible_fields};
