mod attachment;
mod message;
mod project;
mod request;
mod session;
mod text_utils;

pub use attachment::{Attachment, AttachmentKind};
pub use message::*;
pub use project::Project;
pub use request::{ChatRequest, ContentPart, ImageUrl, RequestContent, RequestMessage};
pub use session::ChatSession;
pub use text_utils::{derive_title, DEFAULT_SESSION_TITLE, TITLE_MAX_CHARS};
