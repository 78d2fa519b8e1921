
use hill_calories_core::domain::{
    meal_analysis::report::{MacroShare, MealReport},
    view_state::entities::ViewState,
};

use crate::application::http::scan::upload::IMAGE_FIELD;

/// Form paths the page posts to.
#[derive(Debug, Clone)]
pub struct PageLinks {
    pub home: String,
    pub capture: String,
    pub reset: String,
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_page(view: &ViewState, links: &PageLinks) -> String {
    let (head_extra, body) = match view {
        ViewState::Landing => (String::new(), landing(links)),
        // the loading screen polls until the analysis settles
        ViewState::Analyzing => (
            format!(
                r#"<meta http-equiv="refresh" content="1;url={}">"#,
                escape_html(&links.home)
            ),
            analyzing(),
        ),
        ViewState::Result { result } => (String::new(), report(&MealReport::from(result), links)),
        ViewState::Error { message } => (String::new(), error(message, links)),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Hill Calories</title>
{head_extra}
</head>
<body data-view="{view}">
<nav><a href="{home}">Hill Calories</a>{nav_capture}</nav>
<main>
{body}
</main>
<footer>Hill Calories AI</footer>
</body>
</html>
"#,
        view = view.name(),
        home = escape_html(&links.home),
        nav_capture = capture_form(links, "Analyze Meal"),
    )
}

fn capture_form(links: &PageLinks, label: &str) -> String {
    format!(
        r#"<form method="post" action="{action}" enctype="multipart/form-data"><label>{label}<input type="file" name="{IMAGE_FIELD}" accept="image/*" capture="environment" onchange="this.form.submit()" hidden></label></form>"#,
        action = escape_html(&links.capture),
        label = escape_html(label),
    )
}

fn reset_form(links: &PageLinks, label: &str) -> String {
    format!(
        r#"<form method="post" action="{action}"><button type="submit">{label}</button></form>"#,
        action = escape_html(&links.reset),
        label = escape_html(label),
    )
}

fn landing(links: &PageLinks) -> String {
    format!(
        r#"<section class="hero">
<h1>Photograph your plate.<br>Get your macros.</h1>
<p>We identify ingredients and estimate portions automatically. No manual entry required.</p>
{form}
</section>"#,
        form = capture_form(links, "Capture & Analyze"),
    )
}

fn analyzing() -> String {
    r#"<section class="loading"><h3>Processing Visual Input...</h3></section>"#.to_string()
}

fn error(message: &str, links: &PageLinks) -> String {
    format!(
        r#"<section class="error">
<h3>Analysis Error</h3>
<p>{message}</p>
{retry}
{cancel}
</section>"#,
        message = escape_html(message),
        retry = capture_form(links, "Retry Analysis"),
        cancel = reset_form(links, "Cancel"),
    )
}

fn macro_rows(macros: &[MacroShare]) -> String {
    macros
        .iter()
        .map(|share| {
            format!(
                r#"<li>{name} <strong>{grams}g</strong> ({percent}%)</li>"#,
                name = escape_html(&share.name),
                grams = share.grams,
                percent = share.percent,
            )
        })
        .collect()
}

fn report(report: &MealReport, links: &PageLinks) -> String {
    let items: String = report
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<li><span class="item-name">{name}</span> <span class="item-quantity">{quantity}</span> <span class="item-calories">{calories} kcal</span><ul>{macros}</ul></li>"#,
                name = escape_html(&item.name),
                quantity = escape_html(&item.quantity),
                calories = item.calories,
                macros = macro_rows(&item.macros),
            )
        })
        .collect();

    let composition = if items.is_empty() {
        String::new()
    } else {
        format!(r#"<h4>Detailed Composition</h4><ul class="items">{items}</ul>"#)
    };

    format!(
        r#"<article class="report">
<header><h2>{meal_name}</h2><p class="totals">{headline}</p></header>
<ul class="macros">{macros}</ul>
{composition}
<blockquote>"{description}"</blockquote>
{reset}
</article>"#,
        meal_name = escape_html(&report.meal_name),
        headline = escape_html(&report.headline),
        macros = macro_rows(&report.macros),
        description = escape_html(&report.description),
        reset = reset_form(links, "Discard & New Capture"),
    )
}
