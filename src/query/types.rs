use crate::query::error::RequestError;
use crate::world::{orientation, ORIENTATION_COUNT};
use std::fmt;
use std::str::FromStr;

/// Direction the player faces while reading the rotations off the blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Cyclic offset added to every observed rotation
    pub fn offset(self) -> i32 {
        match self {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
        }
    }
}

impl FromStr for Facing {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Facing::North),
            "east" => Ok(Facing::East),
            "south" => Ok(Facing::South),
            "west" => Ok(Facing::West),
            other => Err(RequestError::InvalidFacing(other.to_string())),
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis along which a rotation list is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    /// Unit step `(dx, dy, dz)` along this axis.
    pub fn unit(self) -> (i32, i32, i32) {
        match self {
            Axis::X => (1, 0, 0),
            Axis::Y => (0, 1, 0),
            Axis::Z => (0, 0, 1),
        }
    }
}

impl FromStr for Axis {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(RequestError::InvalidDirection(other.to_string())),
        }
    }
}

/// One `(offset, rotation)` requirement relative to a candidate block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
    pub rotation: i32,
}

impl Constraint {
    pub fn new(dx: i32, dy: i32, dz: i32, rotation: i32) -> Self {
        Self { dx, dy, dz, rotation }
    }
}

/// Conjunction of constraints with rotations already shifted into the frame
/// of the position hash.
///
/// Immutable once built; workers share it by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    constraints: Vec<Constraint>,
}

impl Predicate {
    /// Build from constraints as observed while facing `facing`.
    pub fn new(constraints: Vec<Constraint>, facing: Facing) -> Result<Self, RequestError> {
        if constraints.is_empty() {
            return Err(RequestError::EmptyPredicate);
        }

        let offset = facing.offset();
        let constraints = constraints
            .into_iter()
            .map(|c| -> Result<Constraint, RequestError> {
                check_rotation(c.rotation)?;
                Ok(Constraint {
                    rotation: (c.rotation + offset) % ORIENTATION_COUNT,
                    ..c
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { constraints })
    }

    /// Build from a rotation list read block by block along `axis`,
    /// starting at the candidate itself.
    pub fn from_rotations(
        rotations: &[i32],
        axis: Axis,
        facing: Facing,
    ) -> Result<Self, RequestError> {
        let (ux, uy, uz) = axis.unit();
        let constraints = rotations
            .iter()
            .enumerate()
            .map(|(i, &rotation)| {
                let step = i as i32;
                Constraint::new(ux * step, uy * step, uz * step, rotation)
            })
            .collect();
        Self::new(constraints, facing)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Check every constraint against the candidate, stopping at the first
    /// mismatch.
    #[inline]
    pub fn matches(&self, x: i32, y: i32, z: i32) -> bool {
        self.constraints.iter().all(|c| {
            orientation(
                x.wrapping_add(c.dx),
                y.wrapping_add(c.dy),
                z.wrapping_add(c.dz),
            ) == c.rotation
        })
    }
}

pub(crate) fn check_rotation(rotation: i32) -> Result<(), RequestError> {
    if (0..ORIENTATION_COUNT).contains(&rotation) {
        Ok(())
    } else {
        Err(RequestError::RotationOutOfRange(rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_offsets() {
        let offsets: Vec<i32> = Facing::ALL.iter().map(|f| f.offset()).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_facing_parse() {
        assert_eq!("west".parse::<Facing>(), Ok(Facing::West));
        assert_eq!(
            "up".parse::<Facing>(),
            Err(RequestError::InvalidFacing("up".to_string()))
        );
        // Case sensitive, like the option values documented in the help
        assert!("North".parse::<Facing>().is_err());
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("z".parse::<Axis>(), Ok(Axis::Z));
        assert_eq!(Axis::default(), Axis::Y);
        assert!(matches!("h".parse::<Axis>(), Err(RequestError::InvalidDirection(_))));
    }

    #[test]
    fn test_facing_normalization_wraps() {
        let p = Predicate::new(
            vec![Constraint::new(0, 0, 0, 0), Constraint::new(0, 1, 0, 3)],
            Facing::South,
        )
        .unwrap();
        let rotations: Vec<i32> = p.constraints().iter().map(|c| c.rotation).collect();
        assert_eq!(rotations, vec![2, 1]);
    }

    #[test]
    fn test_empty_predicate_rejected() {
        assert_eq!(
            Predicate::new(Vec::new(), Facing::North),
            Err(RequestError::EmptyPredicate)
        );
        assert_eq!(
            Predicate::from_rotations(&[], Axis::Y, Facing::North),
            Err(RequestError::EmptyPredicate)
        );
    }

    #[test]
    fn test_rotation_out_of_range_rejected() {
        assert_eq!(
            Predicate::from_rotations(&[0, 4], Axis::Y, Facing::North),
            Err(RequestError::RotationOutOfRange(4))
        );
        assert_eq!(
            Predicate::new(vec![Constraint::new(0, 0, 0, -1)], Facing::East),
            Err(RequestError::RotationOutOfRange(-1))
        );
    }

    #[test]
    fn test_rotation_list_strides_along_axis() {
        let p = Predicate::from_rotations(&[1, 2, 3], Axis::X, Facing::North).unwrap();
        let offsets: Vec<(i32, i32, i32)> =
            p.constraints().iter().map(|c| (c.dx, c.dy, c.dz)).collect();
        assert_eq!(offsets, vec![(0, 0, 0), (1, 0, 0), (2, 0, 0)]);

        let p = Predicate::from_rotations(&[1, 2], Axis::Z, Facing::North).unwrap();
        assert_eq!(p.constraints()[1], Constraint::new(0, 0, 1, 2));
    }

    #[test]
    fn test_matches_known_column() {
        // Rotations at (0, 0..4, 0) are 0, 0, 1, 3
        let p = Predicate::from_rotations(&[0, 0, 1, 3], Axis::Y, Facing::North).unwrap();
        assert!(p.matches(0, 0, 0));

        let p = Predicate::from_rotations(&[0, 0, 1, 2], Axis::Y, Facing::North).unwrap();
        assert!(!p.matches(0, 0, 0));
    }

    #[test]
    fn test_matches_with_facing() {
        // Observed while facing east, each rotation reads one lower
        let p = Predicate::from_rotations(&[3, 3, 0, 2], Axis::Y, Facing::East).unwrap();
        assert!(p.matches(0, 0, 0));
    }

    #[test]
    fn test_matches_with_offsets() {
        // Row along x at y=0, z=0 is 0, 1, 0, 2, 3, ...
        let p = Predicate::new(
            vec![Constraint::new(3, 0, 0, 2), Constraint::new(4, 0, 0, 3)],
            Facing::North,
        )
        .unwrap();
        assert!(p.matches(0, 0, 0));
        assert!(!p.matches(1, 0, 0));
    }
}
