//! Deck Render Engine - DeckRendererPort 实现
//!
//! 结构化文档 → PPTX；模型直接给出的 HTML 原样保存（仅在 `</head>` 前注入主题变量）。

use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, LazyLock};

use super::layout::{layout_deck, RenderOptions};
use super::pptx;
use crate::application::ports::{ArtifactStorePort, DeckRendererPort, RenderError};
use crate::domain::presentation::SlideDocument;
use crate::domain::project::{ArtifactFormat, ProjectId, RenderedArtifact};
use crate::domain::theme::ThemeConfig;

static HIDDEN_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style|head)\b.*?</(script|style|head)\s*>").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static CLASS_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)class\s*=\s*["']([^"']*)["']"#).unwrap());

/// 渲染引擎
pub struct DeckRenderEngine {
    artifacts: Arc<dyn ArtifactStorePort>,
    options: RenderOptions,
}

impl DeckRenderEngine {
    pub fn new(artifacts: Arc<dyn ArtifactStorePort>, options: RenderOptions) -> Self {
        Self { artifacts, options }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    async fn persist(
        &self,
        id: &ProjectId,
        format: ArtifactFormat,
        bytes: &[u8],
        pages: usize,
    ) -> Result<RenderedArtifact, RenderError> {
        let path = self
            .artifacts
            .write(id, format, bytes)
            .await
            .map_err(|e| RenderError::Storage(e.to_string()))?;

        let artifact = RenderedArtifact {
            path,
            format,
            pages,
            size_bytes: bytes.len() as u64,
            md5: format!("{:x}", md5::compute(bytes)),
        };

        tracing::info!(
            project_id = %id,
            format = format.extension(),
            pages = artifact.pages,
            size = artifact.size_bytes,
            md5 = %artifact.md5,
            "Artifact rendered"
        );
        Ok(artifact)
    }
}

#[async_trait]
impl DeckRendererPort for DeckRenderEngine {
    async fn render(
        &self,
        id: &ProjectId,
        document: &SlideDocument,
        theme: &ThemeConfig,
    ) -> Result<RenderedArtifact, RenderError> {
        let document = document.clone();
        let theme = *theme;
        let options = self.options;

        // 打包是纯 CPU 工作
        let (bytes, pages) = tokio::task::spawn_blocking(move || {
            let deck = layout_deck(&document, &theme, options);
            let bytes = pptx::write_package(&deck, &document.title, &theme)?;
            let runs = pptx::count_text_runs(&bytes)?;
            Ok::<_, pptx::PackageError>((bytes, deck.len(), runs))
        })
        .await
        .map_err(|e| RenderError::Package(e.to_string()))?
        .map_err(|e| RenderError::Package(e.to_string()))
        .and_then(|(bytes, pages, runs)| {
            if runs == 0 {
                Err(RenderError::NoTextContent)
            } else {
                Ok((bytes, pages))
            }
        })?;

        self.persist(id, ArtifactFormat::Pptx, &bytes, pages).await
    }

    async fn store_html(
        &self,
        id: &ProjectId,
        html: &str,
        theme: &ThemeConfig,
    ) -> Result<RenderedArtifact, RenderError> {
        if visible_text(html).is_empty() {
            return Err(RenderError::NoTextContent);
        }
        let pages = count_html_slides(html);
        let themed = with_theme_variables(html, theme);
        self.persist(id, ArtifactFormat::Html, themed.as_bytes(), pages)
            .await
    }
}

/// 去掉标签与不可见块后的文字
fn visible_text(html: &str) -> String {
    let without_hidden = HIDDEN_BLOCK_REGEX.replace_all(html, " ");
    let text = TAG_REGEX.replace_all(&without_hidden, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// class 列表中含 `slide` 的元素数，至少 1 页
fn count_html_slides(html: &str) -> usize {
    CLASS_ATTR_REGEX
        .captures_iter(html)
        .filter(|caps| caps[1].split_whitespace().any(|c| c == "slide"))
        .count()
        .max(1)
}

/// 在 `</head>` 前注入主题 CSS 变量；没有 head 或已定义变量时原样返回
fn with_theme_variables(html: &str, theme: &ThemeConfig) -> String {
    if html.contains("--color-primary") {
        return html.to_string();
    }
    match html.to_ascii_lowercase().find("</head>") {
        Some(at) => format!(
            "{}<style>\n{}</style>\n{}",
            &html[..at],
            theme.css_variables(),
            &html[at..]
        ),
        None => html.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presentation::{ContentType, Slide};
    use crate::domain::theme::ThemeRegistry;
    use crate::infrastructure::persistence::file::FileArtifactStore;

    fn engine(dir: &std::path::Path, options: RenderOptions) -> DeckRenderEngine {
        DeckRenderEngine::new(Arc::new(FileArtifactStore::new(dir)), options)
    }

    fn theme() -> ThemeConfig {
        *ThemeRegistry::builtin().get("corporate_blue")
    }

    fn document(n: usize) -> SlideDocument {
        SlideDocument {
            title: "Roadmap".to_string(),
            description: "Next year".to_string(),
            slides: (1..=n)
                .map(|i| {
                    Slide::new(format!("Part {i}"), ContentType::BulletPoints)
                        .with_bullets([format!("Point {i}")])
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_render_writes_title_plus_one_page_per_slide() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path(), RenderOptions::default());
        let id = ProjectId::new();

        let artifact = engine.render(&id, &document(3), &theme()).await.unwrap();

        assert_eq!(artifact.pages, 4);
        assert_eq!(artifact.format, ArtifactFormat::Pptx);
        assert_eq!(artifact.file_name(), format!("presentation_{id}.pptx"));

        let bytes = std::fs::read(&artifact.path).unwrap();
        assert_eq!(artifact.size_bytes, bytes.len() as u64);
        assert_eq!(artifact.md5, format!("{:x}", md5::compute(&bytes)));
    }

    #[tokio::test]
    async fn test_render_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path(), RenderOptions { gradients: false });

        let a = engine.render(&ProjectId::new(), &document(2), &theme()).await.unwrap();
        let b = engine.render(&ProjectId::new(), &document(2), &theme()).await.unwrap();
        assert_eq!(a.md5, b.md5);
    }

    #[tokio::test]
    async fn test_store_html_counts_slides_and_injects_theme() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path(), RenderOptions::default());
        let html = "<html><head><title>x</title></head><body>\
                    <section class=\"slide title\">Hello</section>\
                    <section class='slide'>World</section>\
                    <div class=\"slide-notes\">n</div></body></html>";

        let artifact = engine
            .store_html(&ProjectId::new(), html, &theme())
            .await
            .unwrap();

        assert_eq!(artifact.pages, 2);
        let stored = std::fs::read_to_string(&artifact.path).unwrap();
        assert!(stored.contains("--color-primary"));
        assert!(stored.contains("<section class='slide'>World</section>"));
    }

    #[tokio::test]
    async fn test_store_html_without_visible_text_fails() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(dir.path(), RenderOptions::default());
        let html = "<html><head><style>body{}</style></head><body> <div></div> </body></html>";

        let err = engine
            .store_html(&ProjectId::new(), html, &theme())
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::NoTextContent));
    }

    #[test]
    fn test_slide_count_defaults_to_one() {
        assert_eq!(count_html_slides("<p>just text</p>"), 1);
    }
}
