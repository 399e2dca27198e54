//! Project Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

use super::ProjectError;

/// 项目唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ProjectId {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ProjectError::InvalidId(s.to_string()))
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 项目状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Running => "running",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Failed => "failed",
        }
    }

    /// 仍在排队或执行中
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectStatus::Pending | ProjectStatus::Running)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 流水线阶段（状态机的状态）
///
/// Planning → ContentCreation → Design → Rendering → Completed，
/// 任一非终止状态都可以进入 Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Planning,
    ContentCreation,
    Design,
    Rendering,
    Completed,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Planning => "planning",
            Stage::ContentCreation => "content_creation",
            Stage::Design => "design",
            Stage::Rendering => "rendering",
            Stage::Completed => "completed",
            Stage::Failed => "failed",
        }
    }

    /// 面向用户的阶段名
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Planning => "Planning",
            Stage::ContentCreation => "Content Creation",
            Stage::Design => "Design",
            Stage::Rendering => "Rendering",
            Stage::Completed => "Completed",
            Stage::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 进度事件级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// 产物格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Pptx,
    Html,
}

impl ArtifactFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Pptx => "pptx",
            ArtifactFormat::Html => "html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            ArtifactFormat::Html => "text/html; charset=utf-8",
        }
    }

    /// 产物文件名，只由项目 ID 决定
    pub fn file_name(&self, id: &ProjectId) -> String {
        format!("presentation_{}.{}", id, self.extension())
    }
}

/// 渲染产物描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedArtifact {
    pub path: PathBuf,
    pub format: ArtifactFormat,
    /// 页数（标题页 + 内容页）
    pub pages: usize,
    pub size_bytes: u64,
    pub md5: String,
}

impl RenderedArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_parse() {
        let id = ProjectId::new();
        let parsed: ProjectId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<ProjectId>().is_err());
    }

    #[test]
    fn test_artifact_file_name_is_deterministic() {
        let id: ProjectId = "6f1c1d1e-2a3b-4c5d-8e9f-0a1b2c3d4e5f".parse().unwrap();
        assert_eq!(
            ArtifactFormat::Pptx.file_name(&id),
            "presentation_6f1c1d1e-2a3b-4c5d-8e9f-0a1b2c3d4e5f.pptx"
        );
        assert_eq!(ArtifactFormat::Html.extension(), "html");
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::ContentCreation).unwrap();
        assert_eq!(json, "\"content_creation\"");
        assert_eq!(Stage::ContentCreation.to_string(), "Content Creation");
    }
}
