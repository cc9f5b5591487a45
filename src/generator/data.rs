use super::utils::render_author;

/// Values handed to the page template.
#[derive(Debug)]
pub(crate) struct PageData<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub date: String,
    pub author_html: String,
}

impl<'a> PageData<'a> {
    pub fn new(title: &'a str, content: &'a str, date: String, author: Option<&'a str>) -> Self {
        PageData {
            title,
            content,
            date,
            author_html: author.map(render_author).unwrap_or_default(),
        }
    }

    /// Value for a `{name}` placeholder, HTML-ready.
    pub fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(maud::html! { (self.title) }.into_string()),
            "content" => Some(self.content.to_string()),
            "date" => Some(self.date.clone()),
            "author_html" => Some(self.author_html.clone()),
            _ => None,
        }
    }
}
