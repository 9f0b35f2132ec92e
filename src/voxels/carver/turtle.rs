//! Turtle state and the actions an expanded grammar string drives it with.

use cgmath::{Basis3, Deg, InnerSpace, Point3, Rotation, Rotation3, Vector3};

/// One interpretable symbol of an expanded grammar string.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurtleAction {
    /// `F`: carve a segment and move to its end.
    Advance,
    /// `[`: save the turtle.
    Push,
    /// `]`: restore the last saved turtle and start a narrower branch.
    Pop,
    /// `+`: turn by a positive angle about the vertical axis.
    RotateLeft,
    /// `-`: turn by a negative angle about the vertical axis.
    RotateRight,
}

impl TurtleAction {
    /// Maps a grammar symbol to its action.
    ///
    /// Non-terminals such as `X` and `B` only drive expansion and return `None`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'F' => Some(TurtleAction::Advance),
            '[' => Some(TurtleAction::Push),
            ']' => Some(TurtleAction::Pop),
            '+' => Some(TurtleAction::RotateLeft),
            '-' => Some(TurtleAction::RotateRight),
            _ => None,
        }
    }
}

/// Position, heading and brush of the carving turtle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Turtle {
    /// Center of the channel at the turtle's current end point.
    pub position: Point3<f32>,
    /// Horizontal heading; kept unit length.
    pub orientation: Vector3<f32>,
    /// Length of one advance.
    pub step_length: f32,
    /// Capsule radius carved by the next advance.
    pub radius: f32,
    /// Set by a pop; the next advance tapers the radius first.
    pub new_branch: bool,
}

impl Turtle {
    /// A fresh turtle; `orientation` is normalized.
    pub fn new(position: Point3<f32>, orientation: Vector3<f32>, step_length: f32, radius: f32) -> Self {
        Turtle {
            position,
            orientation: orientation.normalize(),
            step_length,
            radius,
            new_branch: false,
        }
    }

    /// Where the next advance would end.
    pub fn segment_end(&self) -> Point3<f32> {
        self.position + self.orientation * self.step_length
    }

    /// Turns the heading about +Y (right-hand rule).
    pub fn rotate_y(&mut self, degrees: f32) {
        let rotation: Basis3<f32> = Rotation3::from_angle_y(Deg(degrees));
        self.orientation = rotation.rotate_vector(self.orientation).normalize();
    }

    /// Shrinks the radius for a new branch, never below `min_radius`.
    pub fn taper(&mut self, factor: f32, min_radius: f32) {
        self.radius = (self.radius * factor).max(min_radius);
        self.new_branch = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_map_to_actions() {
        let actions: Vec<_> = "F[+-]XB".chars().filter_map(TurtleAction::from_symbol).collect();
        assert_eq!(
            actions,
            vec![
                TurtleAction::Advance,
                TurtleAction::Push,
                TurtleAction::RotateLeft,
                TurtleAction::RotateRight,
                TurtleAction::Pop,
            ]
        );
    }

    #[test]
    fn quarter_turns_stay_horizontal() {
        let mut turtle = Turtle::new(Point3::new(0.0, 135.0, 0.0), Vector3::unit_z(), 8.0, 6.0);
        turtle.rotate_y(90.0);
        assert!((turtle.orientation - Vector3::unit_x()).magnitude() < 1e-5);
        turtle.rotate_y(-180.0);
        assert!((turtle.orientation + Vector3::unit_x()).magnitude() < 1e-5);
        assert_eq!(turtle.orientation.y, 0.0);
    }

    #[test]
    fn segment_end_is_one_step_ahead() {
        let turtle = Turtle::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 4.0), 8.0, 6.0);
        assert_eq!(turtle.segment_end(), Point3::new(1.0, 2.0, 11.0));
    }

    #[test]
    fn taper_clamps_to_the_minimum() {
        let mut turtle = Turtle::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_x(), 8.0, 3.0);
        turtle.new_branch = true;
        turtle.taper(0.5, 2.0);
        assert_eq!(turtle.radius, 2.0);
        assert!(!turtle.new_branch);
    }
}
