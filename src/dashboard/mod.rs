//! Dashboard report
//!
//! Renders a standalone page with the total spent in a date range, a legend of
//! the categories, a pie chart of the per-category breakdown and the list of
//! expenses in the range.

mod charts;

use maud::{Markup, html};

use crate::{
    aggregation::{DateRange, Summary, format_date},
    category::{Category, category_color},
    html::{
        HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
};

use charts::{DashboardChart, breakdown_chart, chart_script, chart_view};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

/// Render the dashboard for `summary` as a full HTML document.
///
/// `range` is only used for the page heading, the caller is expected to have
/// built `summary` from the same range.
pub fn render_dashboard(summary: &Summary, range: DateRange) -> Markup {
    let chart = DashboardChart {
        id: "breakdown-chart",
        options: breakdown_chart(&summary.breakdown).to_string(),
    };

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-2" { "Dashboard" }

            p id="date-range" class="mb-4"
            {
                (format_date(range.start)) " to " (format_date(range.end))
            }

            p id="total" class="text-xl font-semibold mb-4"
            {
                "Total: " (format_currency(summary.total))
            }

            (legend_view())

            @if summary.filtered.is_empty() {
                p id="no-data" { "No expenses in this date range." }
            } @else {
                (chart_view(&chart))
                (expense_table(summary))
            }
        }
    );

    let scripts = if summary.filtered.is_empty() {
        vec![]
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
            chart_script(&chart),
        ]
    };

    base("Dashboard", &scripts, &content)
}

fn legend_view() -> Markup {
    html!(
        ul id="legend" class="flex flex-wrap gap-4 mb-4"
        {
            @for category in Category::ALL {
                li class="flex items-center gap-2"
                {
                    span
                        class="inline-block w-3 h-3 rounded-full"
                        style={ "background-color: " (category.color()) }
                    {}
                    (category.as_str())
                }
            }
        }
    )
}

fn expense_table(summary: &Summary) -> Markup {
    html!(
        table id="expenses" class="w-full text-sm text-left"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                }
            }

            tbody
            {
                @for expense in &summary.filtered {
                    tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
                    {
                        td class=(TABLE_CELL_STYLE) { (expense.date) }
                        td class=(TABLE_CELL_STYLE) { (expense.name) }
                        td
                            class=(TABLE_CELL_STYLE)
                            style={ "color: " (category_color(&expense.category)) }
                        {
                            (expense.category)
                        }
                        td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
                    }
                }
            }
        }
    )
}
