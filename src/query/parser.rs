//! Parsers for the two textual predicate forms.
//!
//! Rotation list: `0,3,1,1` (rotations read one block apart along an axis).
//!
//! Constraint objects: `{dx:0,dy:0,dz:0,r:2},{dx:1,dy:0,dz:0,r:3}`. Keys may
//! be quoted (`"dx"`), an enclosing `[...]` is ignored, every object needs
//! all four keys exactly once.

use crate::query::error::RequestError;
use crate::query::types::{check_rotation, Constraint};

const OBJECT_END: char = '}';
const OBJECT_START: char = '{';

/// Parse a comma-separated rotation list. Empty items are skipped, so the
/// result may be empty; emptiness is rejected when the predicate is built.
pub fn parse_rotation_list(input: &str) -> Result<Vec<i32>, RequestError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| -> Result<i32, RequestError> {
            let rotation = parse_int(token)?;
            check_rotation(rotation)?;
            Ok(rotation)
        })
        .collect()
}

/// Parse a sequence of constraint objects, splitting on `}`.
pub fn parse_constraint_objects(input: &str) -> Result<Vec<Constraint>, RequestError> {
    let mut constraints = Vec::new();
    let mut pieces = input.split(OBJECT_END).peekable();

    while let Some(piece) = pieces.next() {
        let is_last = pieces.peek().is_none();
        let body = piece.trim_start_matches(|c: char| c.is_whitespace() || c == ',' || c == '[');

        if is_last {
            // Text after the final `}` may only close the list
            let rest = body.trim_end_matches(|c: char| c.is_whitespace() || c == ']');
            if !rest.is_empty() {
                return Err(RequestError::IncompleteConstraint(format!(
                    "'{}' is missing a closing '}}'",
                    rest.trim()
                )));
            }
            break;
        }

        let Some(fields) = body.strip_prefix(OBJECT_START) else {
            return Err(RequestError::MalformedConstraint(piece.trim().to_string()));
        };
        constraints.push(parse_object_fields(fields)?);
    }

    Ok(constraints)
}

#[derive(Default)]
struct PartialConstraint {
    dx: Option<i32>,
    dy: Option<i32>,
    dz: Option<i32>,
    r: Option<i32>,
}

fn parse_object_fields(fields: &str) -> Result<Constraint, RequestError> {
    let mut partial = PartialConstraint::default();

    for field in fields.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let Some((key, value)) = field.split_once(':') else {
            return Err(RequestError::MalformedConstraint(field.to_string()));
        };
        let key = key.trim().trim_matches('"');
        let value = parse_int(value.trim())?;

        let slot = match key {
            "dx" => &mut partial.dx,
            "dy" => &mut partial.dy,
            "dz" => &mut partial.dz,
            "r" => &mut partial.r,
            other => return Err(RequestError::UnknownKey(other.to_string())),
        };
        if slot.replace(value).is_some() {
            return Err(RequestError::DuplicateKey(key.to_string()));
        }
    }

    let missing: Vec<&str> = [
        ("dx", partial.dx.is_none()),
        ("dy", partial.dy.is_none()),
        ("dz", partial.dz.is_none()),
        ("r", partial.r.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    match (partial.dx, partial.dy, partial.dz, partial.r) {
        (Some(dx), Some(dy), Some(dz), Some(r)) => {
            check_rotation(r)?;
            Ok(Constraint::new(dx, dy, dz, r))
        }
        _ => Err(RequestError::IncompleteConstraint(format!(
            "missing {}",
            missing.join(", ")
        ))),
    }
}

fn parse_int(token: &str) -> Result<i32, RequestError> {
    token
        .parse::<i32>()
        .map_err(|_| RequestError::InvalidInteger(token.to_string()))
}
