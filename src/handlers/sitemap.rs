//! Root page listing every route the service mounts.

/// One mounted path and the methods it answers.
#[derive(Clone, Copy, Debug)]
pub struct RouteEntry {
    pub path: &'static str,
    pub methods: &'static [&'static str],
}

impl RouteEntry {
    /// True for GET routes without path parameters; those are rendered as links.
    fn is_browsable(&self) -> bool {
        self.methods.contains(&"GET") && !self.path.contains(':')
    }
}

/// Render the HTML sitemap.
pub fn render(entries: &[RouteEntry]) -> String {
    let mut items = String::new();
    for entry in entries {
        let methods = entry.methods.join(", ");
        let path = if entry.is_browsable() {
            format!("<a href=\"{0}\">{0}</a>", entry.path)
        } else {
            entry.path.to_string()
        };
        items.push_str(&format!("<li><code>{}</code> {}</li>", methods, path));
    }
    format!(
        "<!doctype html><html><head><title>{name}</title></head><body>\
         <h1>{name} {version}</h1><p>Endpoints:</p><ul>{items}</ul></body></html>",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        items = items,
    )
}
