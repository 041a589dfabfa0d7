/// One of the four sub-rectangles of a quadtree node.
///
/// The discriminant is the digit used for the quadrant in a tile address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// upper-left, digit `1`
    UpperLeft = 1,
    /// upper-right, digit `2`
    UpperRight = 2,
    /// lower-left, digit `3`
    LowerLeft = 3,
    /// lower-right, digit `4`
    LowerRight = 4,
}
pub use self::Quadrant::*;

impl Quadrant {
    /// All quadrants in address order
    pub fn all() -> std::iter::Copied<std::slice::Iter<'static, Quadrant>> {
        [UpperLeft, UpperRight, LowerLeft, LowerRight].iter().copied()
    }
    /// The position of this quadrant among a node's children
    pub fn index(self) -> usize {
        self as usize - 1
    }
    /// The address digit of this quadrant
    pub fn digit(self) -> char {
        (b'0' + self as u8) as char
    }
    /// Parses an address digit
    pub fn from_digit(c: char) -> Option<Quadrant> {
        match c {
            '1' => Some(UpperLeft),
            '2' => Some(UpperRight),
            '3' => Some(LowerLeft),
            '4' => Some(LowerRight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_round_trip() {
        for quadrant in Quadrant::all() {
            assert_eq!(Quadrant::from_digit(quadrant.digit()), Some(quadrant));
        }
        assert_eq!(Quadrant::from_digit('0'), None);
        assert_eq!(Quadrant::from_digit('5'), None);
        assert_eq!(LowerLeft.index(), 2);
    }
}
