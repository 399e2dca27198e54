//! Deck Renderer Port - 渲染引擎抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::presentation::SlideDocument;
use crate::domain::project::{ProjectId, RenderedArtifact};
use crate::domain::theme::ThemeConfig;

/// 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 渲染结果不含任何可见文字
    #[error("no text content survived rendering")]
    NoTextContent,

    #[error("Package error: {0}")]
    Package(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Deck Renderer Port
#[async_trait]
pub trait DeckRendererPort: Send + Sync {
    /// 文档 + 主题 → 分页产物（标题页 + 每张幻灯片一页）
    async fn render(
        &self,
        id: &ProjectId,
        document: &SlideDocument,
        theme: &ThemeConfig,
    ) -> Result<RenderedArtifact, RenderError>;

    /// 保存模型直接给出的 HTML 产物
    async fn store_html(
        &self,
        id: &ProjectId,
        html: &str,
        theme: &ThemeConfig,
    ) -> Result<RenderedArtifact, RenderError>;
}
