//! 导师指令渲染
//!
//! render_instructions 是 (内容, 状态) 的纯函数：同样的输入总是得到同样的文本。
//! 每次模式/概念切换后都会整体重新生成，替换 Agent 当前的指令。

use crate::tutor::{Mode, TutorContent, TutorState};

const GREETING_SECTION: &str = "\
- **INITIAL GREETING** (first time the user connects):
- Greet the user warmly and introduce yourself as their Active Recall Coach.
- List the available concepts from the content.
- Explain the three learning modes briefly:
  * **Learn** - I'll explain a concept to you (my current mode)
  * **Quiz** - I'll ask you questions to test your knowledge
  * **Teach-Back** - You explain the concept to me and I'll score your understanding
- Ask which concept they'd like to focus on and which mode they prefer.
- Once they choose, use the `switch_mode` tool to activate that mode and concept.
";

const LEARN_SECTION: &str = "\
- **LEARN Mode**:
- Explain the chosen concept using the 'summary' from the content.
- Be engaging, clear, and concise.
- After explaining, ask if they are ready for a quiz or want to teach it back.
";

const QUIZ_SECTION: &str = "\
- **QUIZ Mode**:
- Ask the 'sample_question' or generate a similar simple question about the concept.
- Wait for their answer.
- If correct, praise them and ask another question or suggest moving to Teach-Back.
- If incorrect, gently correct them and explain the right answer.
";

const TEACH_BACK_SECTION: &str = "\
- **TEACH-BACK Mode**:
- Ask the user to explain the concept to YOU.
- Listen carefully.
- After they explain, give them a **Score (0-10)** and brief qualitative feedback.
- Start your feedback with \"Score: X/10\".
- Be a fair but rigorous coach.
";

const SWITCHING_RULES: &str = "\
**CRITICAL MODE SWITCHING RULES:**
- You MUST call `switch_mode` when the user says ANY of these:
  * \"quiz me\", \"test me\", \"ask me questions\" -> switch_mode(mode='quiz')
  * \"teach me\", \"explain\", \"let's learn\" -> switch_mode(mode='learn')
  * \"I'll teach you\", \"let me explain\", \"teach back\" -> switch_mode(mode='teach_back')
  * \"let's do [concept]\" -> switch_mode with that concept_id
- After switching, immediately start acting in that mode - don't ask for confirmation.
- Keep all responses brief and conversational (voice interface).
- ALWAYS acknowledge the mode switch by starting your response with the new mode behavior.
";

/// 当前状态对应的模式说明段落
pub fn mode_section(state: &TutorState) -> &'static str {
    match state.mode {
        Mode::Learn if state.is_greeting() => GREETING_SECTION,
        Mode::Learn => LEARN_SECTION,
        Mode::Quiz => QUIZ_SECTION,
        Mode::TeachBack => TEACH_BACK_SECTION,
    }
}

/// 生成完整指令：角色、概念 JSON、当前模式/概念、模式段落、切换规则
pub fn render_instructions(content: &TutorContent, state: &TutorState) -> String {
    let concepts_json =
        serde_json::to_string_pretty(content.concepts()).unwrap_or_else(|_| "[]".to_string());

    let mut out = String::new();
    out.push_str("You are an Active Recall Coach designed to help users learn concepts effectively.\n\n");
    out.push_str("**AVAILABLE CONTENT:**\n");
    out.push_str(&concepts_json);
    out.push_str("\n\n**CURRENT MODE:** ");
    out.push_str(state.mode.label());
    out.push('\n');
    if let Some(concept) = state.concept_id.as_deref().and_then(|id| content.get(id)) {
        out.push_str(&format!("**CURRENT CONCEPT:** {} ({})\n", concept.title, concept.id));
    }
    out.push_str("\n**YOUR BEHAVIOR:**\n");
    out.push_str(mode_section(state));
    out.push('\n');
    out.push_str(SWITCHING_RULES);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::Concept;

    fn content() -> TutorContent {
        TutorContent::new(vec![Concept {
            id: "loops".to_string(),
            title: "Loops".to_string(),
            summary: "Loops repeat a block of code.".to_string(),
            sample_question: "What is a for loop?".to_string(),
        }])
    }

    #[test]
    fn test_initial_state_renders_greeting() {
        let text = render_instructions(&content(), &TutorState::default());
        assert!(text.contains("**CURRENT MODE:** LEARN"));
        assert!(text.contains("**INITIAL GREETING**"));
        assert!(!text.contains("**CURRENT CONCEPT:**"));
        assert!(text.contains("\"sample_question\": \"What is a for loop?\""));
    }

    #[test]
    fn test_each_mode_has_its_section() {
        let expected = [
            (Mode::Learn, "**LEARN Mode**"),
            (Mode::Quiz, "**QUIZ Mode**"),
            (Mode::TeachBack, "**TEACH-BACK Mode**"),
        ];
        for (mode, marker) in expected {
            let state = TutorState {
                mode,
                concept_id: Some("loops".to_string()),
            };
            let text = render_instructions(&content(), &state);
            assert!(text.contains(marker), "{mode} should render {marker}");
            assert!(text.contains("**CURRENT CONCEPT:** Loops (loops)"));
            assert!(text.contains("CRITICAL MODE SWITCHING RULES"));
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let state = TutorState {
            mode: Mode::Quiz,
            concept_id: Some("loops".to_string()),
        };
        assert_eq!(
            render_instructions(&content(), &state),
            render_instructions(&content(), &state)
        );
    }

    #[test]
    fn test_empty_content_still_renders() {
        let text = render_instructions(&TutorContent::default(), &TutorState::default());
        assert!(text.contains("**AVAILABLE CONTENT:**\n[]"));
    }
}
