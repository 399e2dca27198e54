//! Project Context - GenerationRequest

use serde::{Deserialize, Serialize};

use super::{ProjectError, ProjectId};

/// 一次生成请求（创建后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    project_id: ProjectId,
    topic: String,
    slide_count: usize,
    theme_id: String,
}

impl GenerationRequest {
    /// 创建请求
    ///
    /// 页数上限由应用层按配置校验，这里只保证主题非空、页数至少为 1
    pub fn new(
        project_id: ProjectId,
        topic: impl Into<String>,
        slide_count: usize,
        theme_id: impl Into<String>,
    ) -> Result<Self, ProjectError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(ProjectError::InvalidRequest("topic is required".to_string()));
        }
        if slide_count == 0 {
            return Err(ProjectError::InvalidRequest(
                "slide count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            project_id,
            topic,
            slide_count,
            theme_id: theme_id.into(),
        })
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_topic() {
        let req = GenerationRequest::new(ProjectId::new(), "  Solar  ", 3, "ocean_depths").unwrap();
        assert_eq!(req.topic(), "Solar");
        assert_eq!(req.slide_count(), 3);
    }

    #[test]
    fn test_request_rejects_empty_topic_and_zero_slides() {
        assert!(GenerationRequest::new(ProjectId::new(), "   ", 3, "x").is_err());
        assert!(GenerationRequest::new(ProjectId::new(), "Topic", 0, "x").is_err());
    }
}
