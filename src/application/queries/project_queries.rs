//! Project Queries - 项目与主题查询

use crate::domain::project::ProjectId;

/// 查询项目快照
#[derive(Debug, Clone)]
pub struct GetProjectStatus {
    pub project_id: ProjectId,
}

/// 列出全部项目
#[derive(Debug, Clone, Default)]
pub struct ListProjects;

/// 列出主题
#[derive(Debug, Clone, Default)]
pub struct ListThemes;

/// 获取已完成项目的产物
#[derive(Debug, Clone)]
pub struct GetArtifact {
    pub project_id: ProjectId,
}
