//! Shared HTML building blocks for the dashboard report.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

/// Classes for a table's header row.
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase bg-gray-50";

/// Classes for a table's body rows.
pub const TABLE_ROW_STYLE: &str = "bg-white border-b";

/// Classes for table header and body cells.
pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

/// Classes for the element that holds a page's content.
pub const PAGE_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 mx-auto text-gray-900";

/// An extra element for the `<head>` of a page.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

/// Wrap `content` in a standalone HTML document.
pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50"
            {
                (content)
            }
        }
    }
}

/// Format `number` as dollars with two decimal places, e.g. "$1,234.50".
pub fn format_currency(number: f64) -> String {
    static FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let formatter = FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    let sign = if number < 0.0 { "-" } else { "" };

    let formatted_string = match formatter {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        Some(_) if number == 0.0 => return "$0.00".to_owned(),
        Some(formatter) => formatter.fmt_string(number.abs()),
        None => format!("${:.2}", number.abs()),
    };

    // numfmt drops trailing zeros, e.g. "12.30" is rendered as "$12.3".
    let padded = match formatted_string.find('.') {
        None => format!("{formatted_string}.00"),
        Some(point) if formatted_string.len() - point == 2 => format!("{formatted_string}0"),
        Some(_) => formatted_string,
    };

    format!("{sign}{padded}")
}

#[cfg(test)]
mod tests {
    use maud::html;
    use scraper::{Html, Selector};

    use super::{HeadElement, base, format_currency};

    #[test]
    fn format_currency_pads_to_two_decimal_places() {
        assert_eq!(format_currency(3.5), "$3.50");
        assert_eq!(format_currency(10.0), "$10.00");
        assert_eq!(format_currency(0.25), "$0.25");
    }

    #[test]
    fn format_currency_zero_and_negative() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-3.5), "-$3.50");
    }

    #[test]
    fn base_includes_title_and_scripts() {
        let content = html!(p { "hello" });
        let scripts = [HeadElement::ScriptLink("chart.js".to_owned())];

        let document = Html::parse_document(&base("Dashboard", &scripts, &content).into_string());

        let title = document
            .select(&Selector::parse("title").unwrap())
            .next()
            .unwrap();
        assert_eq!(title.text().collect::<String>(), "Dashboard - Expense Tracker");
        assert!(
            document
                .select(&Selector::parse("script[src='chart.js']").unwrap())
                .next()
                .is_some()
        );
    }
}
