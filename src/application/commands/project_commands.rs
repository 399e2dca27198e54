//! Project Commands - 生成项目相关命令

use crate::domain::project::ProjectId;

/// 提交生成任务
#[derive(Debug, Clone)]
pub struct SubmitGeneration {
    pub topic: String,
    /// 缺省使用配置中的默认页数
    pub num_slides: Option<usize>,
    /// 缺省使用默认主题
    pub theme: Option<String>,
}

/// 提交结果
#[derive(Debug, Clone)]
pub struct SubmitGenerationResponse {
    pub project_id: ProjectId,
    pub theme_id: String,
    pub slide_count: usize,
}

/// 删除项目（快照 + 产物）
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub project_id: ProjectId,
}

/// 删除结果
#[derive(Debug, Clone)]
pub struct DeleteProjectResponse {
    pub project_id: ProjectId,
    pub artifact_removed: bool,
}
