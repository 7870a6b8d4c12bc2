//! The fixed set of expense categories and their display colors.

use std::{fmt::Display, str::FromStr};

/// The color used for any category without an assigned color.
pub const DEFAULT_CATEGORY_COLOR: &str = "#808080";

/// The categories a user can pick from when recording an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Meals, groceries and snacks.
    Food,
    /// Transport and accommodation.
    Travel,
    /// Going out, games, subscriptions.
    Entertainment,
    /// Rent, utilities and other recurring charges.
    Bills,
    /// Anything else.
    Miscellaneous,
}

impl Category {
    /// All categories, in the order they are offered to the user.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Entertainment,
        Category::Bills,
        Category::Miscellaneous,
    ];

    /// The name the category is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    /// The hex color used to draw the category in charts and legends.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#33FF57",
            Category::Travel => "#3357FF",
            Category::Entertainment => "#FF5733",
            Category::Bills => "#FF33A1",
            Category::Miscellaneous => DEFAULT_CATEGORY_COLOR,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string did not name one of the fixed categories.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a category, expected one of Food, Travel, Entertainment, Bills or Miscellaneous")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Get the display color for a stored category name.
///
/// Names outside the fixed set fall back to [DEFAULT_CATEGORY_COLOR].
pub fn category_color(name: &str) -> &'static str {
    name.parse::<Category>()
        .map(|category| category.color())
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::{Category, DEFAULT_CATEGORY_COLOR, UnknownCategory, category_color};

    #[test]
    fn known_categories_have_fixed_colors() {
        assert_eq!(category_color("Food"), "#33FF57");
        assert_eq!(category_color("Travel"), "#3357FF");
        assert_eq!(category_color("Entertainment"), "#FF5733");
        assert_eq!(category_color("Bills"), "#FF33A1");
        assert_eq!(category_color("Miscellaneous"), "#808080");
    }

    #[test]
    fn unknown_category_is_gray() {
        assert_eq!(category_color("Groceries"), DEFAULT_CATEGORY_COLOR);
        assert_eq!(category_color(""), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("Bills".parse(), Ok(Category::Bills));
        assert_eq!(
            "bills".parse::<Category>(),
            Err(UnknownCategory("bills".to_owned()))
        );
    }

    #[test]
    fn all_round_trips_through_names() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse(), Ok(category));
        }
    }
}
