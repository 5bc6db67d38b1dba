use crate::query::error::RequestError;
use crate::query::parser::{parse_constraint_objects, parse_rotation_list};
use crate::query::types::{Axis, Facing, Predicate};
use crate::search::volume::{Coordinate, SearchVolume};
use crate::utils::num_cpus;

/// Fully validated search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub facing: Facing,
    pub direction: Axis,
    pub predicate: Predicate,
    pub volume: SearchVolume,
    pub workers: usize,
}

/// Raw, unvalidated request fields as they come off the command line.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    facing: Option<String>,
    direction: Option<String>,
    rotations: Option<String>,
    constraints: Option<String>,
    min_x: Option<i32>,
    max_x: Option<i32>,
    min_y: Option<i32>,
    max_y: Option<i32>,
    min_z: Option<i32>,
    max_z: Option<i32>,
    workers: Option<usize>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn facing(mut self, facing: impl Into<String>) -> Self {
        self.facing = Some(facing.into());
        self
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Comma-separated rotation list, laid out along `direction`.
    pub fn rotations(mut self, rotations: impl Into<String>) -> Self {
        self.rotations = Some(rotations.into());
        self
    }

    /// Constraint objects `{dx:..,dy:..,dz:..,r:..}`.
    pub fn constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = Some(constraints.into());
        self
    }

    pub fn x_range(mut self, min: i32, max: i32) -> Self {
        self.min_x = Some(min);
        self.max_x = Some(max);
        self
    }

    pub fn y_range(mut self, min: i32, max: i32) -> Self {
        self.min_y = Some(min);
        self.max_y = Some(max);
        self
    }

    pub fn z_range(mut self, min: i32, max: i32) -> Self {
        self.min_z = Some(min);
        self.max_z = Some(max);
        self
    }

    /// Set each bound individually; `None` leaves it missing.
    pub fn bounds(
        mut self,
        min: (Option<i32>, Option<i32>, Option<i32>),
        max: (Option<i32>, Option<i32>, Option<i32>),
    ) -> Self {
        (self.min_x, self.min_y, self.min_z) = min;
        (self.max_x, self.max_y, self.max_z) = max;
        self
    }

    /// Worker count; defaults to the CPU count.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Validate every field. Nothing is searched until this succeeds.
    pub fn build(self) -> Result<SearchRequest, RequestError> {
        if self.rotations.is_some() && self.constraints.is_some() {
            return Err(RequestError::ConflictingPredicates);
        }

        let facing: Facing = self
            .facing
            .as_deref()
            .ok_or(RequestError::MissingFacing)?
            .parse()?;

        let direction = match self.direction.as_deref() {
            Some(d) => d.parse()?,
            None => Axis::default(),
        };

        let predicate = match (self.rotations.as_deref(), self.constraints.as_deref()) {
            (Some(list), None) => {
                Predicate::from_rotations(&parse_rotation_list(list)?, direction, facing)?
            }
            (None, Some(objects)) => Predicate::new(parse_constraint_objects(objects)?, facing)?,
            _ => return Err(RequestError::EmptyPredicate),
        };

        let min = Coordinate::new(
            self.min_x.ok_or(RequestError::MissingBound("minX"))?,
            self.min_y.ok_or(RequestError::MissingBound("minY"))?,
            self.min_z.ok_or(RequestError::MissingBound("minZ"))?,
        );
        let max = Coordinate::new(
            self.max_x.ok_or(RequestError::MissingBound("maxX"))?,
            self.max_y.ok_or(RequestError::MissingBound("maxY"))?,
            self.max_z.ok_or(RequestError::MissingBound("maxZ"))?,
        );
        let volume = SearchVolume::new(min, max)?;

        let workers = self.workers.unwrap_or_else(num_cpus);
        if workers == 0 {
            return Err(RequestError::ZeroWorkers);
        }

        Ok(SearchRequest {
            facing,
            direction,
            predicate,
            volume,
            workers,
        })
    }
}
