//! Template engine for rendering site pages.

use minijinja::{context, Environment};

/// One row of the homepage article index.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArticleSummary {
    /// Article id, used to build the link
    pub id: String,
    /// Display title (falls back to the id when the source has none)
    pub title: String,
    /// Free-form date string, possibly absent
    pub date: Option<String>,
}

/// Context for rendering the homepage.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IndexContext {
    /// Site title
    pub site_title: String,
    /// Articles, newest first
    pub articles: Vec<ArticleSummary>,
}

/// Context for rendering a single article page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArticleContext {
    /// Site title
    pub site_title: String,
    /// Article title (falls back to the id)
    pub title: String,
    /// Authors line, possibly absent
    pub authors: Option<String>,
    /// Date line, possibly absent
    pub date: Option<String>,
    /// Rendered article HTML
    pub content: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned("article.html".to_string(), ARTICLE_TEMPLATE.to_string())
            .expect("Failed to add article template");

        Self { env }
    }

    /// Render the homepage article index.
    pub fn render_index(&self, ctx: &IndexContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            title => &ctx.site_title,
            site_title => &ctx.site_title,
            articles => &ctx.articles,
        })
    }

    /// Render a single article page.
    pub fn render_article(&self, ctx: &ArticleContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("article.html")?;

        tmpl.render(context! {
            title => &ctx.title,
            site_title => &ctx.site_title,
            authors => &ctx.authors,
            date => &ctx.date,
            content => &ctx.content,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <header class="site-header">
    <a href="/" class="site-title">{{ site_title }}</a>
  </header>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<ul class="article-list">
{% for article in articles %}
  <li class="article-entry">
    <a href="/articles/{{ article.id }}">{{ article.title }}</a>
    {% if article.date %}<span class="article-date">{{ article.date }}</span>{% endif %}
  </li>
{% endfor %}
</ul>
{% endblock %}"##;

const ARTICLE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="article">
  <h1 class="article-title">{{ title }}</h1>
  {% if authors %}<p class="article-authors">{{ authors }}</p>{% endif %}
  {% if date %}<p class="article-date">{{ date }}</p>{% endif %}
  <div class="content">
    {{ content | safe }}
  </div>
</article>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_index_with_article_links() {
        let engine = TemplateEngine::new();

        let ctx = IndexContext {
            site_title: "My Site".to_string(),
            articles: vec![
                ArticleSummary {
                    id: "hello".to_string(),
                    title: "Hello".to_string(),
                    date: Some("2024-01-01".to_string()),
                },
                ArticleSummary {
                    id: "undated".to_string(),
                    title: "undated".to_string(),
                    date: None,
                },
            ],
        };

        let html = engine.render_index(&ctx).unwrap();

        assert!(html.contains("<title>My Site - My Site</title>"));
        assert!(html.contains(r#"<a href="/articles/hello">Hello</a>"#));
        assert!(html.contains("2024-01-01"));
        assert!(html.contains(r#"<a href="/articles/undated">undated</a>"#));
    }

    #[test]
    fn renders_article_page() {
        let engine = TemplateEngine::new();

        let ctx = ArticleContext {
            site_title: "My Site".to_string(),
            title: "A Post".to_string(),
            authors: Some("An Author".to_string()),
            date: Some("2024-06-01".to_string()),
            content: "<p>Hello world</p>".to_string(),
        };

        let html = engine.render_article(&ctx).unwrap();

        assert!(html.contains("<title>A Post - My Site</title>"));
        assert!(html.contains("<h1 class=\"article-title\">A Post</h1>"));
        assert!(html.contains("An Author"));
        assert!(html.contains("<p>Hello world</p>"));
    }

    #[test]
    fn omits_absent_metadata() {
        let engine = TemplateEngine::new();

        let ctx = ArticleContext {
            site_title: "My Site".to_string(),
            title: "bare".to_string(),
            authors: None,
            date: None,
            content: String::new(),
        };

        let html = engine.render_article(&ctx).unwrap();

        assert!(!html.contains("article-authors"));
        assert!(!html.contains("article-date"));
    }
}
