//! Household name formatting
//!
//! Produces the six canonical household names (FullName, SortName,
//! InformalName, FormalName, EnvelopeName, RecognitionName) from the raw
//! member inputs. The formatter is an ordered rule cascade: each rule pairs
//! a predicate over the household shape with a renderer, rules are evaluated
//! top to bottom, and the first match wins. The final rule always applies,
//! so formatting is total and never fails.

use hearth_domain::role::{
    is_child_role, is_parent_role, is_sibling_role, is_spouse_role, normalize_parent_role,
};
use hearth_domain::{CanonicalNameSet, Person};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Courtesy title printed for the second spouse of a different-surname couple
///
/// Donor records show both conventions in the wild, so the choice is a
/// configuration setting rather than a constant. Same-surname couples always
/// format as "Mr. and Mrs." regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpouseTitle {
    /// Traditional "Mrs."
    Mrs,
    /// Neutral "Ms."
    Ms,
}

impl SpouseTitle {
    /// Get the printable title, trailing period included
    pub fn as_str(&self) -> &'static str {
        match self {
            SpouseTitle::Mrs => "Mrs.",
            SpouseTitle::Ms => "Ms.",
        }
    }
}

impl Default for SpouseTitle {
    fn default() -> Self {
        SpouseTitle::Mrs
    }
}

impl fmt::Display for SpouseTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SpouseTitle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('.').to_lowercase().as_str() {
            "mrs" => Ok(SpouseTitle::Mrs),
            "ms" => Ok(SpouseTitle::Ms),
            other => Err(format!("Unknown spouse title: {}", other)),
        }
    }
}

/// Formatting conventions that vary between organizations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingConfig {
    /// Title for the second spouse when the couple keeps different surnames
    pub second_spouse_title: SpouseTitle,
}

/// Raw inputs for one household's names
///
/// The second adult is represented by blank strings when absent; children
/// influence which rule matches but their own names never appear in the
/// output.
#[derive(Debug, Clone)]
pub struct FormatRequest<'a> {
    /// First adult's given name
    pub first1: &'a str,
    /// First adult's surname
    pub last1: &'a str,
    /// Second adult's given name, blank when absent
    pub first2: &'a str,
    /// Second adult's surname, blank when absent
    pub last2: &'a str,
    /// First adult's declared role
    pub role1: &'a str,
    /// Second adult's declared role, blank when absent
    pub role2: &'a str,
    /// Children of the household
    pub children: &'a [Person],
}

impl<'a> FormatRequest<'a> {
    /// Build a request from ordered household members
    pub fn for_members(
        head: &'a Person,
        second: Option<&'a Person>,
        children: &'a [Person],
    ) -> Self {
        Self {
            first1: &head.first_name,
            last1: &head.last_name,
            first2: second.map(|p| p.first_name.as_str()).unwrap_or(""),
            last2: second.map(|p| p.last_name.as_str()).unwrap_or(""),
            role1: &head.declared_role,
            role2: second.map(|p| p.declared_role.as_str()).unwrap_or(""),
            children,
        }
    }
}

/// Applies the naming rule cascade
#[derive(Debug, Clone, Default)]
pub struct NameFormatter {
    config: NamingConfig,
}

impl NameFormatter {
    /// Create a formatter with the given conventions
    pub fn new(config: NamingConfig) -> Self {
        Self { config }
    }

    /// Produce all six canonical names for one household
    ///
    /// Evaluates the cascade top to bottom and renders the first matching
    /// rule. The trailing single-person rule accepts any input, so every
    /// call returns a fully populated name set.
    pub fn format(&self, request: &FormatRequest<'_>) -> CanonicalNameSet {
        let ctx = FormatContext::new(request, &self.config);
        for rule in RULES {
            if (rule.applies)(&ctx) {
                debug!("Naming rule '{}' matched", rule.name);
                return (rule.render)(&ctx);
            }
        }
        render_single_person(&ctx)
    }
}

/// Normalized view of one request, shared by every predicate and renderer
struct FormatContext<'a> {
    first1: &'a str,
    last1: &'a str,
    first2: &'a str,
    last2: &'a str,
    role1: String,
    role2: String,
    has_second: bool,
    has_children: bool,
    same_surname: bool,
    second_spouse_title: &'static str,
}

impl<'a> FormatContext<'a> {
    fn new(request: &FormatRequest<'a>, config: &NamingConfig) -> Self {
        let first1 = request.first1.trim();
        let last1 = request.last1.trim();
        let first2 = request.first2.trim();
        let last2 = request.last2.trim();
        Self {
            first1,
            last1,
            first2,
            last2,
            role1: request.role1.trim().to_lowercase(),
            role2: request.role2.trim().to_lowercase(),
            has_second: !first2.is_empty() && !last2.is_empty(),
            has_children: !request.children.is_empty(),
            same_surname: last1.to_lowercase() == last2.to_lowercase(),
            second_spouse_title: config.second_spouse_title.as_str(),
        }
    }
}

struct NamingRule {
    name: &'static str,
    applies: fn(&FormatContext<'_>) -> bool,
    render: fn(&FormatContext<'_>) -> CanonicalNameSet,
}

/// The cascade, highest priority first
///
/// Order matters twice: specific shapes must precede the generic ones that
/// would also accept them, and the final rule must accept everything.
const RULES: &[NamingRule] = &[
    NamingRule {
        name: "single-parent",
        applies: single_parent_applies,
        render: render_single_parent,
    },
    NamingRule {
        name: "married-couple-with-children",
        applies: married_with_children_applies,
        render: render_married,
    },
    NamingRule {
        name: "unmarried-parents-with-children",
        applies: unmarried_parents_applies,
        render: render_married,
    },
    NamingRule {
        name: "family-with-children",
        applies: family_with_children_applies,
        render: render_family,
    },
    NamingRule {
        name: "adult-parent-and-child",
        applies: parent_and_child_applies,
        render: render_parent_and_child,
    },
    NamingRule {
        name: "sibling-pair",
        applies: siblings_applies,
        render: render_siblings,
    },
    NamingRule {
        name: "married-couple",
        applies: married_applies,
        render: render_married,
    },
    NamingRule {
        name: "adult-pair",
        applies: adult_pair_applies,
        render: render_adult_pair,
    },
    NamingRule {
        name: "single-person",
        applies: single_person_applies,
        render: render_single_person,
    },
];

fn single_parent_applies(ctx: &FormatContext<'_>) -> bool {
    !ctx.has_second && ctx.has_children && is_parent_role(&ctx.role1)
}

fn married_with_children_applies(ctx: &FormatContext<'_>) -> bool {
    ctx.has_second && ctx.has_children && is_spouse_role(&ctx.role1) && is_spouse_role(&ctx.role2)
}

fn unmarried_parents_applies(ctx: &FormatContext<'_>) -> bool {
    ctx.has_second && ctx.has_children && is_parent_role(&ctx.role1) && is_parent_role(&ctx.role2)
}

fn family_with_children_applies(ctx: &FormatContext<'_>) -> bool {
    ctx.has_second && ctx.has_children
}

fn parent_and_child_applies(ctx: &FormatContext<'_>) -> bool {
    ctx.has_second
        && !ctx.has_children
        && ((is_parent_role(&ctx.role1) && is_child_role(&ctx.role2))
            || (is_child_role(&ctx.role1) && is_parent_role(&ctx.role2)))
}

fn siblings_applies(ctx: &FormatContext<'_>) -> bool {
    ctx.has_second && !ctx.has_children && is_sibling_role(&ctx.role1) && is_sibling_role(&ctx.role2)
}

fn married_applies(ctx: &FormatContext<'_>) -> bool {
    ctx.has_second && !ctx.has_children && is_spouse_role(&ctx.role1) && is_spouse_role(&ctx.role2)
}

fn adult_pair_applies(ctx: &FormatContext<'_>) -> bool {
    ctx.has_second && !ctx.has_children
}

fn single_person_applies(_ctx: &FormatContext<'_>) -> bool {
    true
}

/// "Ms." when the role implies a mother, otherwise "Mr."
fn parent_title(role: &str) -> &'static str {
    if normalize_parent_role(role) == "mother" {
        "Ms."
    } else {
        "Mr."
    }
}

/// Per-sibling title: "Mr." for a brother, "Ms." otherwise
fn sibling_title(role: &str) -> &'static str {
    if role == "brother" {
        "Mr."
    } else {
        "Ms."
    }
}

fn render_single_parent(ctx: &FormatContext<'_>) -> CanonicalNameSet {
    single_parent_names(ctx.first1, ctx.last1, parent_title(&ctx.role1))
}

fn single_parent_names(first: &str, last: &str, title: &str) -> CanonicalNameSet {
    CanonicalNameSet::new(
        format!("The {} Family", last),
        format!("{}, {}", last, first),
        first,
        format!("{} {}", title, last),
        format!("{} {}", first, last),
        format!("{} {} {}", title, first, last),
    )
}

fn render_married(ctx: &FormatContext<'_>) -> CanonicalNameSet {
    if ctx.same_surname {
        CanonicalNameSet::new(
            format!("The {} {} Family", ctx.first1, ctx.last1),
            format!("{}, {} and {}", ctx.last1, ctx.first1, ctx.first2),
            format!("{} and {}", ctx.first1, ctx.first2),
            format!("Mr. and Mrs. {}", ctx.last1),
            format!("{} and {} {}", ctx.first1, ctx.first2, ctx.last1),
            format!(
                "Mr. and Mrs. {} and {} {}",
                ctx.first1, ctx.first2, ctx.last1
            ),
        )
    } else {
        let t2 = ctx.second_spouse_title;
        CanonicalNameSet::new(
            format!("The {}/{} Family", ctx.last1, ctx.last2),
            format!(
                "{}, {} and {} {}",
                ctx.last1, ctx.first1, ctx.first2, ctx.last2
            ),
            format!("{} and {}", ctx.first1, ctx.first2),
            format!("Mr. {} and {} {}", ctx.last1, t2, ctx.last2),
            format!(
                "{} {} and {} {}",
                ctx.first1, ctx.last1, ctx.first2, ctx.last2
            ),
            format!(
                "Mr. {} {} and {} {} {}",
                ctx.first1, ctx.last1, t2, ctx.first2, ctx.last2
            ),
        )
    }
}

fn render_family(ctx: &FormatContext<'_>) -> CanonicalNameSet {
    if ctx.same_surname {
        CanonicalNameSet::new(
            format!("The {} Family", ctx.last1),
            format!("{}, {} and {}", ctx.last1, ctx.first1, ctx.first2),
            format!("{} and {}", ctx.first1, ctx.first2),
            format!("The {} Family", ctx.last1),
            format!("{} and {} {}", ctx.first1, ctx.first2, ctx.last1),
            format!(
                "The {} and {} {} Family",
                ctx.first1, ctx.first2, ctx.last1
            ),
        )
    } else {
        CanonicalNameSet::new(
            format!("The {}/{} Family", ctx.last1, ctx.last2),
            format!(
                "{}, {} and {} {}",
                ctx.last1, ctx.first1, ctx.first2, ctx.last2
            ),
            format!("{} and {}", ctx.first1, ctx.first2),
            format!("The {}/{} Family", ctx.last1, ctx.last2),
            format!(
                "{} {} and {} {}",
                ctx.first1, ctx.last1, ctx.first2, ctx.last2
            ),
            format!(
                "The {} {} and {} {} Family",
                ctx.first1, ctx.last1, ctx.first2, ctx.last2
            ),
        )
    }
}

fn render_parent_and_child(ctx: &FormatContext<'_>) -> CanonicalNameSet {
    // The household is named for the parent side only
    let (first, last, role) = if is_parent_role(&ctx.role1) {
        (ctx.first1, ctx.last1, ctx.role1.as_str())
    } else {
        (ctx.first2, ctx.last2, ctx.role2.as_str())
    };
    single_parent_names(first, last, parent_title(role))
}

fn render_siblings(ctx: &FormatContext<'_>) -> CanonicalNameSet {
    let t1 = sibling_title(&ctx.role1);
    let t2 = sibling_title(&ctx.role2);
    if ctx.same_surname {
        CanonicalNameSet::new(
            format!("The {} Family", ctx.last1),
            format!("{}, {} and {}", ctx.last1, ctx.first1, ctx.first2),
            format!("{} and {}", ctx.first1, ctx.first2),
            format!("{} and {} {}", t1, t2, ctx.last1),
            format!("{} and {} {}", ctx.first1, ctx.first2, ctx.last1),
            format!("{} and {} {}", ctx.first1, ctx.first2, ctx.last1),
        )
    } else {
        CanonicalNameSet::new(
            format!("The {}/{} Family", ctx.last1, ctx.last2),
            format!(
                "{}, {} and {} {}",
                ctx.last1, ctx.first1, ctx.first2, ctx.last2
            ),
            format!("{} and {}", ctx.first1, ctx.first2),
            format!("{} {} and {} {}", t1, ctx.last1, t2, ctx.last2),
            format!(
                "{} {} and {} {}",
                ctx.first1, ctx.last1, ctx.first2, ctx.last2
            ),
            format!(
                "{} {} and {} {}",
                ctx.first1, ctx.last1, ctx.first2, ctx.last2
            ),
        )
    }
}

fn render_adult_pair(ctx: &FormatContext<'_>) -> CanonicalNameSet {
    if ctx.same_surname {
        CanonicalNameSet::new(
            format!("The {} {} Family", ctx.first1, ctx.last1),
            format!("{}, {} and {}", ctx.last1, ctx.first1, ctx.first2),
            format!("{} and {}", ctx.first1, ctx.first2),
            format!("Mr. and Ms. {}", ctx.last1),
            format!("{} and {} {}", ctx.first1, ctx.first2, ctx.last1),
            format!(
                "Mr. and Ms. {} and {} {}",
                ctx.first1, ctx.first2, ctx.last1
            ),
        )
    } else {
        CanonicalNameSet::new(
            format!("The {}/{} Family", ctx.last1, ctx.last2),
            format!(
                "{}, {} and {} {}",
                ctx.last1, ctx.first1, ctx.first2, ctx.last2
            ),
            format!("{} and {}", ctx.first1, ctx.first2),
            format!("Mr. {} and Ms. {}", ctx.last1, ctx.last2),
            format!(
                "{} {} and {} {}",
                ctx.first1, ctx.last1, ctx.first2, ctx.last2
            ),
            format!(
                "Mr. {} {} and Ms. {} {}",
                ctx.first1, ctx.last1, ctx.first2, ctx.last2
            ),
        )
    }
}

fn render_single_person(ctx: &FormatContext<'_>) -> CanonicalNameSet {
    if ctx.has_children {
        // Same shape as the single-parent rule, with best-effort title
        return render_single_parent(ctx);
    }
    let normalized = normalize_parent_role(&ctx.role1);
    let title = if matches!(normalized.as_str(), "father" | "brother") {
        "Mr."
    } else {
        "Ms."
    };
    CanonicalNameSet::new(
        format!("The {} Family", ctx.last1),
        format!("{}, {}", ctx.last1, ctx.first1),
        ctx.first1,
        format!("{} {}", title, ctx.last1),
        format!("{} {}", ctx.first1, ctx.last1),
        format!("The {} {} Family", ctx.first1, ctx.last1),
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn role_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[a-z]{1,10}",
            proptest::sample::select(vec![
                "husband", "wife", "partner", "spouse", "father", "mother", "dad", "mom", "son",
                "daughter", "child", "brother", "sister",
            ])
            .prop_map(str::to_string),
        ]
    }

    proptest! {
        #[test]
        fn every_branch_fills_all_six_fields(
            first1 in "[A-Za-z]{1,12}",
            last1 in "[A-Za-z]{1,12}",
            second in proptest::option::of(("[A-Za-z]{1,12}", "[A-Za-z]{1,12}")),
            role1 in role_strategy(),
            role2 in role_strategy(),
            child_count in 0usize..4,
        ) {
            let children: Vec<Person> = (0..child_count)
                .map(|i| Person::new(format!("Kid{}", i), last1.clone(), "daughter").unwrap())
                .collect();
            let (first2, last2) = second.unwrap_or_default();
            let names = NameFormatter::default().format(&FormatRequest {
                first1: &first1,
                last1: &last1,
                first2: &first2,
                last2: &last2,
                role1: &role1,
                role2: &role2,
                children: &children,
            });
            for (label, value) in names.fields() {
                prop_assert!(!value.is_empty(), "{} must never be blank", label);
            }
        }
    }
}
