//! Active Recall 导师：learn / quiz / teach_back 三种模式围绕一组静态概念展开

pub mod agent;
pub mod coach;
pub mod content;
pub mod instructions;
pub mod mode;
pub mod state;
pub mod tools;

pub use agent::TutorAgent;
pub use coach::{SwitchRejected, TutorCoach, TEACH_BACK_ACK};
pub use content::{Concept, TutorContent};
pub use instructions::render_instructions;
pub use mode::{InvalidMode, Mode, VoiceMap};
pub use state::TutorState;
pub use tools::{EvaluateTeachBackTool, SwitchModeTool};
