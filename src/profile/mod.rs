//! Student profiles: the records, the editable draft and the editor.

pub mod draft;
pub mod editor;
pub mod model;

pub use draft::{BasicInfo, ChoiceField, ProfileDraft, SkillKind, Tag, TagField, TagId, TagList};
pub use editor::ProfileEditor;
pub use model::{
    Availability, Choice, InteractionMode, InteractionModeCode, LearningStyle, LearningStyleCode,
    NormalizedProfile, StoredProfile, StudentProfile,
};
