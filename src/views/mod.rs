use axum::response::Html;
use tera::{Context, Tera};

use crate::models::Flash;

/// HTML templates, embedded so the binary runs from any working directory
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("add_device.html", include_str!("../../templates/add_device.html")),
    ("configurations.html", include_str!("../../templates/configurations.html")),
];

/// Views renders the HTML pages
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<Html<String>, tera::Error> {
        self.tera.render(name, context).map(Html)
    }
}

/// Context shared by every page: flashes and the logged-in operator
pub fn page_context(flashes: &[Flash], operator: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("flashes", flashes);
    context.insert("operator", &operator);
    context
}
