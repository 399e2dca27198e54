//! Stage Descriptors - 流水线阶段定义
//!
//! 每个阶段是一条纯数据记录：阶段、名称、执行方式。
//! Sequencer 用同一个循环依次执行

use crate::domain::presentation::{ContentType, SlideDocument};
use crate::domain::project::{GenerationRequest, Stage};

/// 提示词构造函数：请求 + 上一阶段的文档
pub type PromptBuilder = fn(&GenerationRequest, Option<&SlideDocument>) -> String;

/// 阶段执行方式
#[derive(Clone, Copy)]
pub enum StageKind {
    /// 调用生成式后端，输出经过规范化
    Generate {
        prompt: PromptBuilder,
        /// 是否接受 HTML 直出
        accepts_html: bool,
    },
    /// 本地确定性渲染
    Render,
}

/// 阶段描述
#[derive(Clone, Copy)]
pub struct StageDescriptor {
    pub stage: Stage,
    pub name: &'static str,
    pub kind: StageKind,
}

impl std::fmt::Debug for StageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            StageKind::Generate { .. } => "generate",
            StageKind::Render => "render",
        };
        f.debug_struct("StageDescriptor")
            .field("stage", &self.stage)
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

/// 默认阶段表：规划 → 内容 → 设计 → 渲染
pub const DEFAULT_STAGES: [StageDescriptor; 4] = [
    StageDescriptor {
        stage: Stage::Planning,
        name: "Planning presentation structure",
        kind: StageKind::Generate {
            prompt: planning_prompt,
            accepts_html: false,
        },
    },
    StageDescriptor {
        stage: Stage::ContentCreation,
        name: "Writing slide content",
        kind: StageKind::Generate {
            prompt: content_prompt,
            accepts_html: false,
        },
    },
    StageDescriptor {
        stage: Stage::Design,
        name: "Designing slide layouts",
        kind: StageKind::Generate {
            prompt: design_prompt,
            accepts_html: true,
        },
    },
    StageDescriptor {
        stage: Stage::Rendering,
        name: "Rendering presentation",
        kind: StageKind::Render,
    },
];

fn content_types() -> String {
    ContentType::ALL
        .iter()
        .map(|ct| ct.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 上一阶段文档序列化为 JSON 作为上下文
fn previous_json(previous: Option<&SlideDocument>) -> String {
    previous
        .and_then(|doc| serde_json::to_string_pretty(doc).ok())
        .unwrap_or_else(|| "{}".to_string())
}

fn planning_prompt(request: &GenerationRequest, _previous: Option<&SlideDocument>) -> String {
    format!(
        "Plan a presentation about \"{topic}\" with exactly {count} content slides.\n\
         Respond with a single JSON object: {{\"presentation_title\": string, \
         \"presentation_description\": string, \"slides\": [{{\"title\": string, \
         \"content_type\": one of [{types}], \"key_points\": [string]}}]}}.\n\
         Do not wrap the JSON in prose.",
        topic = request.topic(),
        count = request.slide_count(),
        types = content_types(),
    )
}

fn content_prompt(request: &GenerationRequest, previous: Option<&SlideDocument>) -> String {
    format!(
        "Write the full content for the presentation \"{topic}\" following this plan:\n\
         {plan}\n\
         Keep exactly {count} slides. For each slide fill the fields its content_type needs: \
         bullet_points or numbered_list → \"bullet_points\"; paragraph → \"content\"; \
         two_column → \"left_content\" and \"right_content\"; comparison → \"left_title\", \
         \"right_title\", \"left_points\", \"right_points\"; image_focus → \"image_description\" \
         and \"bullet_points\". Use plain text without Markdown. Respond with JSON only.",
        topic = request.topic(),
        plan = previous_json(previous),
        count = request.slide_count(),
    )
}

fn design_prompt(request: &GenerationRequest, previous: Option<&SlideDocument>) -> String {
    format!(
        "Review the slide deck below for the \"{theme}\" theme. Balance text between slides, \
         shorten bullets to at most twelve words and choose the content_type that best fits each \
         slide. Return the revised deck as JSON with the same schema.\n{content}",
        theme = request.theme_id(),
        content = previous_json(previous),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ProjectId;

    #[test]
    fn test_stage_order_is_fixed() {
        let order: Vec<Stage> = DEFAULT_STAGES.iter().map(|d| d.stage).collect();
        assert_eq!(
            order,
            vec![Stage::Planning, Stage::ContentCreation, Stage::Design, Stage::Rendering]
        );
        assert!(matches!(DEFAULT_STAGES[3].kind, StageKind::Render));
    }

    #[test]
    fn test_prompts_carry_request_and_previous_document() {
        let req = GenerationRequest::new(ProjectId::new(), "Solar Power", 4, "ocean_depths").unwrap();
        let StageKind::Generate { prompt, .. } = DEFAULT_STAGES[0].kind else {
            panic!("planning stage must generate");
        };
        let text = prompt(&req, None);
        assert!(text.contains("Solar Power"));
        assert!(text.contains("exactly 4"));

        let doc = SlideDocument::new("Plan Title", "d", Vec::new());
        let StageKind::Generate { prompt, .. } = DEFAULT_STAGES[1].kind else {
            panic!("content stage must generate");
        };
        assert!(prompt(&req, Some(&doc)).contains("Plan Title"));
    }
}
