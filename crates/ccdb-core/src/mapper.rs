//! Maps a parsed [`OsmNode`] onto a [`CandidatePos`].
//!
//! Required tags are checked in a fixed order and the first failure wins, so
//! the reported problem is deterministic. Description and type are derived by
//! ordered rule lists evaluated top to bottom; the first rule that produces a
//! value is used.

use crate::campus::CampusResolver;
use crate::error::{FieldProblem, MappingError};
use crate::osm::OsmNode;
use crate::pos::{CandidatePos, PosType};

pub const FALLBACK_DESCRIPTION: &str = "Imported from OpenStreetMap";

const TAG_NAME: &str = "name";
const TAG_STREET: &str = "addr:street";
const TAG_HOUSE_NUMBER: &str = "addr:housenumber";
const TAG_POSTCODE: &str = "addr:postcode";
const TAG_CITY: &str = "addr:city";
const TAG_WEBSITE: &str = "website";
const TAG_OPENING_HOURS: &str = "opening_hours";

/// `tag` matches when its lowercased value is one of `values`.
struct TypeRule {
    tag: &'static str,
    values: &'static [&'static str],
    pos_type: PosType,
}

// amenity before shop
const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        tag: "amenity",
        values: &["cafe", "coffee_shop"],
        pos_type: PosType::Cafe,
    },
    TypeRule {
        tag: "amenity",
        values: &["canteen", "food_court"],
        pos_type: PosType::Cafeteria,
    },
    TypeRule {
        tag: "shop",
        values: &["bakery"],
        pos_type: PosType::Bakery,
    },
    TypeRule {
        tag: "shop",
        values: &["coffee", "cafe"],
        pos_type: PosType::Cafe,
    },
];

const DEFAULT_POS_TYPE: PosType = PosType::Cafe;

type DescriptionRule = fn(&OsmNode) -> Option<String>;

const DESCRIPTION_RULES: &[DescriptionRule] = &[website_description, opening_hours_description];

/// Convert `node` into a candidate POS.
///
/// # Errors
///
/// Returns [`MappingError`] naming the node when `name`, `addr:street`,
/// `addr:housenumber`, `addr:postcode` or `addr:city` is missing or blank, or
/// when the postcode is not an integer.
pub fn map_node_to_candidate<R>(node: &OsmNode, campus: &R) -> Result<CandidatePos, MappingError>
where
    R: CampusResolver + ?Sized,
{
    let name = require_tag(node, TAG_NAME)?;
    let street = require_tag(node, TAG_STREET)?;
    let house_number = require_tag(node, TAG_HOUSE_NUMBER)?;
    let postal_code = parse_postal_code(node, require_tag(node, TAG_POSTCODE)?)?;
    let city = require_tag(node, TAG_CITY)?;

    let description = build_description(node);
    let pos_type = determine_pos_type(node);
    let campus = campus.resolve(node);

    tracing::debug!(
        node_id = node.node_id,
        name,
        pos_type = %pos_type,
        campus = %campus,
        "mapped OSM node to POS candidate"
    );

    Ok(CandidatePos {
        name: name.to_string(),
        description,
        pos_type,
        campus,
        street: street.to_string(),
        house_number: house_number.to_string(),
        postal_code,
        city: city.to_string(),
    })
}

fn require_tag<'a>(node: &'a OsmNode, key: &'static str) -> Result<&'a str, MappingError> {
    node.non_blank_tag(key).ok_or_else(|| {
        tracing::error!(node_id = node.node_id, tag = key, "OSM node is missing a required tag");
        MappingError {
            node_id: node.node_id,
            problem: FieldProblem::Missing(key),
        }
    })
}

fn parse_postal_code(node: &OsmNode, raw: &str) -> Result<i32, MappingError> {
    raw.trim().parse::<i32>().map_err(|e| {
        tracing::error!(
            node_id = node.node_id,
            postcode = raw,
            error = %e,
            "OSM node has a non-numeric postal code"
        );
        MappingError {
            node_id: node.node_id,
            problem: FieldProblem::InvalidPostalCode(raw.to_string()),
        }
    })
}

/// Description from `website` and/or `opening_hours`, else [`FALLBACK_DESCRIPTION`].
#[must_use]
pub fn build_description(node: &OsmNode) -> String {
    DESCRIPTION_RULES
        .iter()
        .find_map(|rule| rule(node))
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string())
}

fn website_description(node: &OsmNode) -> Option<String> {
    let website = node.non_blank_tag(TAG_WEBSITE)?;
    Some(match node.non_blank_tag(TAG_OPENING_HOURS) {
        Some(hours) => format!("Website: {website} | Opening hours: {hours}"),
        None => format!("Website: {website}"),
    })
}

fn opening_hours_description(node: &OsmNode) -> Option<String> {
    node.non_blank_tag(TAG_OPENING_HOURS)
        .map(|hours| format!("Opening hours: {hours}"))
}

/// Infer the POS type from `amenity`, then `shop`; defaults to [`PosType::Cafe`].
#[must_use]
pub fn determine_pos_type(node: &OsmNode) -> PosType {
    let matched = TYPE_RULES.iter().find(|rule| {
        node.tag(rule.tag).is_some_and(|value| {
            let value = value.to_lowercase();
            rule.values.contains(&value.as_str())
        })
    });

    match matched {
        Some(rule) => rule.pos_type,
        None => {
            tracing::debug!(
                node_id = node.node_id,
                "no amenity/shop tag matched, defaulting POS type"
            );
            DEFAULT_POS_TYPE
        }
    }
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
