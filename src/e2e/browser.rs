use std::collections::HashMap;

use reqwest::{Client, Method, Url};
use scraper::{ElementRef, Html, Selector};

use crate::routes::error_chain_fmt;

/// CSS selector for an element on the current page. Resolved lazily, every
/// time it is used, so one locator stays valid across navigations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    css: String,
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            css: selector.into(),
        }
    }

    pub fn test_id(id: &str) -> Self {
        Self::css(format!(r#"[data-testid="{id}"]"#))
    }

    pub fn role(role: &str) -> Self {
        Self::css(format!(r#"[role="{role}"]"#))
    }

    /// Elements matching `selector` inside this locator's elements.
    pub fn descendant(&self, selector: &str) -> Self {
        Self::css(format!("{} {selector}", self.css))
    }

    pub fn as_css(&self) -> &str {
        &self.css
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.css)
    }
}

#[derive(thiserror::Error)]
pub enum BrowserError {
    #[error("No page has been loaded yet.")]
    NoPage,
    #[error("`{0}` is not a valid selector.")]
    InvalidSelector(String),
    #[error("No element matches `{0}`.")]
    NotFound(Locator),
    #[error("Element `{locator}` cannot be used to {action}.")]
    Unsupported {
        locator: Locator,
        action: &'static str,
    },
    #[error("Select `{locator}` has no option `{option}`.")]
    NoSuchOption { locator: Locator, option: String },
    #[error("Failed to resolve `{0}` against the current page.")]
    InvalidUrl(String),
    #[error("{0}")]
    Expectation(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl std::fmt::Debug for BrowserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// The last document the browser received.
#[derive(Debug, Clone)]
struct LoadedPage {
    url: Url,
    status: u16,
    html: String,
}

/// A request the browser is about to make on behalf of a link or a form.
#[derive(Debug, PartialEq)]
struct Navigation {
    method: Method,
    url: Url,
    fields: Vec<(String, String)>,
}

/// Minimal HTML browser for driving server-rendered pages: it follows links,
/// fills and submits forms, and answers questions about the current document.
///
/// Documents are kept as text and parsed per query, so a `Browser` can be
/// moved into a spawned scenario.
pub struct Browser {
    client: Client,
    base_url: Url,
    page: Option<LoadedPage>,
    filled: HashMap<String, String>,
}

impl Browser {
    pub fn new(base_url: Url) -> Result<Self, BrowserError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url,
            page: None,
            filled: HashMap::new(),
        })
    }

    #[tracing::instrument(name = "Browser navigation", skip(self))]
    pub async fn goto(&mut self, path: &str) -> Result<(), BrowserError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| BrowserError::InvalidUrl(path.to_string()))?;
        self.navigate(Navigation {
            method: Method::GET,
            url,
            fields: Vec::new(),
        })
        .await
    }

    /// Types `value` into a text input or textarea. The value is sent with
    /// the next submission of the enclosing form.
    pub fn fill(&mut self, locator: &Locator, value: &str) -> Result<(), BrowserError> {
        let name = self.with_element(locator, |element| {
            let tag = element.value().name();
            let is_text_field = tag == "textarea"
                || (tag == "input"
                    && !matches!(
                        element.value().attr("type"),
                        Some("submit" | "button" | "reset" | "checkbox" | "radio" | "hidden")
                    ));
            match element.value().attr("name") {
                Some(name) if is_text_field => Ok(name.to_string()),
                _ => Err(BrowserError::Unsupported {
                    locator: locator.clone(),
                    action: "fill",
                }),
            }
        })??;

        self.filled.insert(name, value.to_string());
        Ok(())
    }

    /// Picks an option of a `<select>` by its visible label or its value.
    pub fn select_option(&mut self, locator: &Locator, option: &str) -> Result<(), BrowserError> {
        let (name, value) = self.with_element(locator, |element| {
            let name = match (element.value().name(), element.value().attr("name")) {
                ("select", Some(name)) => name.to_string(),
                _ => {
                    return Err(BrowserError::Unsupported {
                        locator: locator.clone(),
                        action: "select an option",
                    });
                }
            };

            options(element)
                .into_iter()
                .find(|(value, label)| label == option || value == option)
                .map(|(value, _)| (name, value))
                .ok_or_else(|| BrowserError::NoSuchOption {
                    locator: locator.clone(),
                    option: option.to_string(),
                })
        })??;

        self.filled.insert(name, value);
        Ok(())
    }

    /// Follows a link, or submits the form a submit button belongs to.
    #[tracing::instrument(name = "Browser click", skip(self), fields(locator = %locator))]
    pub async fn click(&mut self, locator: &Locator) -> Result<(), BrowserError> {
        let navigation = self.with_element(locator, |element| {
            let el = element.value();
            match el.name() {
                "a" => {
                    let href = el.attr("href").ok_or_else(|| BrowserError::Unsupported {
                        locator: locator.clone(),
                        action: "click (link without href)",
                    })?;
                    Ok(Navigation {
                        method: Method::GET,
                        url: self.resolve(href)?,
                        fields: Vec::new(),
                    })
                }
                "button" if el.attr("type").is_none_or(|t| t == "submit") => {
                    self.form_submission(locator, element)
                }
                "input" if el.attr("type") == Some("submit") => {
                    self.form_submission(locator, element)
                }
                _ => Err(BrowserError::Unsupported {
                    locator: locator.clone(),
                    action: "click",
                }),
            }
        })??;

        self.navigate(navigation).await
    }

    /// Submits the form that contains the element, like pressing Enter in a field.
    #[tracing::instrument(name = "Browser submit", skip(self), fields(locator = %locator))]
    pub async fn submit(&mut self, locator: &Locator) -> Result<(), BrowserError> {
        let navigation =
            self.with_element(locator, |element| self.form_submission(locator, element))??;
        self.navigate(navigation).await
    }

    pub fn url(&self) -> Option<&Url> {
        self.page.as_ref().map(|p| &p.url)
    }

    pub fn status(&self) -> Option<u16> {
        self.page.as_ref().map(|p| p.status)
    }

    pub fn title(&self) -> Option<String> {
        self.text(&Locator::css("title"))
    }

    pub fn count(&self, locator: &Locator) -> usize {
        self.with_document(|document| {
            parse_selector(locator).map(|selector| document.select(&selector).count())
        })
        .and_then(Result::ok)
        .unwrap_or(0)
    }

    /// Whether the element exists and neither it nor an ancestor is hidden.
    pub fn is_visible(&self, locator: &Locator) -> bool {
        self.with_element(locator, |element| {
            std::iter::once(element)
                .chain(element.ancestors().filter_map(ElementRef::wrap))
                .all(|e| {
                    let el = e.value();
                    el.attr("hidden").is_none()
                        && el.attr("type") != Some("hidden")
                        && !el
                            .attr("style")
                            .is_some_and(|s| s.replace(' ', "").contains("display:none"))
                })
        })
        .unwrap_or(false)
    }

    /// Text content with whitespace collapsed, like `innerText` on a simple page.
    pub fn text(&self, locator: &Locator) -> Option<String> {
        self.with_element(locator, |element| {
            element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .ok()
    }

    pub fn has_class(&self, locator: &Locator, class: &str) -> bool {
        self.with_element(locator, |element| element.value().classes().any(|c| c == class))
            .unwrap_or(false)
    }

    /// The value a field would be submitted with right now.
    pub fn input_value(&self, locator: &Locator) -> Option<String> {
        self.with_element(locator, |element| {
            let name = element.value().attr("name")?;
            self.filled
                .get(name)
                .cloned()
                .or_else(|| default_value(element))
        })
        .ok()
        .flatten()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text(&Locator::css("body"))
            .is_some_and(|body| body.contains(needle))
    }

    async fn navigate(&mut self, navigation: Navigation) -> Result<(), BrowserError> {
        tracing::debug!(method = %navigation.method, url = %navigation.url, "Loading page");

        let request = if navigation.method == Method::POST {
            self.client.post(navigation.url).form(&navigation.fields)
        } else {
            let mut url = navigation.url;
            if !navigation.fields.is_empty() {
                url.query_pairs_mut()
                    .clear()
                    .extend_pairs(navigation.fields.iter());
            }
            self.client.get(url)
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().clone();
        let html = response.text().await?;

        self.page = Some(LoadedPage { url, status, html });
        self.filled.clear();
        Ok(())
    }

    fn resolve(&self, reference: &str) -> Result<Url, BrowserError> {
        let base = self.url().unwrap_or(&self.base_url);
        base.join(reference)
            .map_err(|_| BrowserError::InvalidUrl(reference.to_string()))
    }

    fn with_document<T>(&self, f: impl FnOnce(&Html) -> T) -> Option<T> {
        self.page.as_ref().map(|page| f(&Html::parse_document(&page.html)))
    }

    fn with_element<T>(
        &self,
        locator: &Locator,
        f: impl FnOnce(ElementRef<'_>) -> T,
    ) -> Result<T, BrowserError> {
        self.with_document(|document| {
            let selector = parse_selector(locator)?;
            document
                .select(&selector)
                .next()
                .map(f)
                .ok_or_else(|| BrowserError::NotFound(locator.clone()))
        })
        .ok_or(BrowserError::NoPage)?
    }

    fn form_submission(
        &self,
        locator: &Locator,
        element: ElementRef<'_>,
    ) -> Result<Navigation, BrowserError> {
        let form = std::iter::once(element)
            .chain(element.ancestors().filter_map(ElementRef::wrap))
            .find(|e| e.value().name() == "form")
            .ok_or_else(|| BrowserError::Unsupported {
                locator: locator.clone(),
                action: "submit (not inside a form)",
            })?;

        let method = match form.value().attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => Method::POST,
            _ => Method::GET,
        };
        let url = match form.value().attr("action") {
            Some(action) if !action.is_empty() => self.resolve(action)?,
            _ => self.url().cloned().ok_or(BrowserError::NoPage)?,
        };

        let mut fields = Vec::new();
        let controls = Selector::parse("input, select, textarea")
            .map_err(|_| BrowserError::InvalidSelector("input, select, textarea".into()))?;
        for control in form.select(&controls) {
            let el = control.value();
            let Some(name) = el.attr("name") else {
                continue;
            };
            if el.attr("disabled").is_some() {
                continue;
            }
            let is_button = el.name() == "input"
                && matches!(el.attr("type"), Some("submit" | "button" | "reset" | "image"));
            if is_button && control.id() != element.id() {
                continue;
            }
            let is_toggle = el.name() == "input" && matches!(el.attr("type"), Some("checkbox" | "radio"));
            if is_toggle && el.attr("checked").is_none() {
                continue;
            }

            let value = self
                .filled
                .get(name)
                .cloned()
                .or_else(|| default_value(control))
                .unwrap_or_default();
            fields.push((name.to_string(), value));
        }

        if element.value().name() == "button" {
            if let Some(name) = element.value().attr("name") {
                let value = element.value().attr("value").unwrap_or_default();
                fields.push((name.to_string(), value.to_string()));
            }
        }

        Ok(Navigation {
            method,
            url,
            fields,
        })
    }
}

fn parse_selector(locator: &Locator) -> Result<Selector, BrowserError> {
    Selector::parse(locator.as_css())
        .map_err(|_| BrowserError::InvalidSelector(locator.as_css().to_string()))
}

/// `(value, label)` of every option of a select element.
fn options(select: ElementRef<'_>) -> Vec<(String, String)> {
    let Ok(option) = Selector::parse("option") else {
        return Vec::new();
    };
    select
        .select(&option)
        .map(|o| {
            let label = o.text().collect::<String>().trim().to_string();
            let value = o.value().attr("value").map_or_else(|| label.clone(), str::to_string);
            (value, label)
        })
        .collect()
}

/// What a control submits when nobody touched it.
fn default_value(control: ElementRef<'_>) -> Option<String> {
    let el = control.value();
    match el.name() {
        "textarea" => Some(control.text().collect()),
        "select" => {
            let selected = Selector::parse("option[selected]")
                .ok()
                .and_then(|s| control.select(&s).next())
                .map(|o| {
                    o.value()
                        .attr("value")
                        .map_or_else(|| o.text().collect::<String>().trim().to_string(), str::to_string)
                });
            selected.or_else(|| options(control).into_iter().next().map(|(value, _)| value))
        }
        "input" if matches!(el.attr("type"), Some("checkbox" | "radio")) => {
            Some(el.attr("value").unwrap_or("on").to_string())
        }
        _ => el.attr("value").map(str::to_string),
    }
}
