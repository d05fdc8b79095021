//! Reading statistics off a rendered profile page.
//!
//! Stats are located by their visible label rather than by position or class
//! names, which change with every site deploy.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractionError;

pub const DAY_STREAK: &str = "Day streak";
pub const TOTAL_XP: &str = "Total XP";

const STATS: [&str; 2] = [DAY_STREAK, TOTAL_XP];

lazy_static! {
    static ref PROFILE_NAME: Selector = Selector::parse(r#"[data-test="profile-username"]"#).unwrap();
    static ref HEADING: Selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
}

/// Raw values read from a profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePage {
    pub display_name: String,
    pub streak: u32,
    pub total_xp: String,
}

impl ProfilePage {
    /// Reads the profile, or `None` when the profile name is not on the page
    /// yet.
    pub fn parse(page: &str) -> Result<Option<Self>, ExtractionError> {
        let html = Html::parse_document(page);

        let Some(name) = html.select(&PROFILE_NAME).next() else {
            return Ok(None);
        };
        let display_name = first_line(name);

        let streak_text = stat_value(&html, DAY_STREAK)?;
        let streak = parse_counter(&streak_text)?;
        let total_xp = stat_value(&html, TOTAL_XP)?;

        Ok(Some(Self {
            display_name,
            streak,
            total_xp,
        }))
    }
}

fn first_line(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::lines)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Text of the element's direct text children.
fn own_text(element: &ElementRef) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect::<String>()
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_label(elem: &ElementRef, label: &str) -> bool {
    normalize(&own_text(elem)).eq_ignore_ascii_case(label)
}

/// Whether the heading is, or belongs to, the profile name.
fn is_profile_name(heading: &ElementRef, names: &[ElementRef]) -> bool {
    names.contains(heading)
        || heading
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|elem| names.contains(&elem))
        || heading.select(&PROFILE_NAME).next().is_some()
}

/// Finds the label, then the closest numeric heading around it.
///
/// The search never widens to a block holding another stat's label, so a card
/// without a value can't borrow its neighbour's.
fn stat_value(html: &Html, label: &'static str) -> Result<String, ExtractionError> {
    let label_elem = html
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|elem| is_label(elem, label))
        .ok_or(ExtractionError::MissingStat(label))?;

    let names: Vec<ElementRef> = html.select(&PROFILE_NAME).collect();
    let others: Vec<&str> = STATS.iter().copied().filter(|s| *s != label).collect();

    for block in label_elem.ancestors().filter_map(ElementRef::wrap) {
        let shared = block
            .descendants()
            .filter_map(ElementRef::wrap)
            .any(|elem| others.iter().any(|other| is_label(&elem, other)));
        if shared {
            break;
        }

        let value = block
            .select(&HEADING)
            .filter(|heading| !is_profile_name(heading, &names))
            .map(|heading| normalize(&heading.text().collect::<String>()))
            .find(|text| text.chars().any(|c| c.is_ascii_digit()));
        if let Some(value) = value {
            return Ok(value);
        }
    }

    Err(ExtractionError::MissingStat(label))
}

fn parse_counter(text: &str) -> Result<u32, ExtractionError> {
    let digits: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '.')
        .collect();
    digits
        .parse()
        .map_err(|_| ExtractionError::InvalidCounter(text.to_string()))
}
