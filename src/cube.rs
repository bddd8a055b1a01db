use std::fmt;

/// Cube corners, in the order the module shows them row by row. Each corner
/// is both a logical identity and a fixed physical slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vertex {
    Ubr,
    Ubl,
    Dbr,
    Ufr,
    Dbl,
    Ufl,
    Dfr,
    Dfl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Down,
    Front,
    Back,
    Left,
    Right,
}

pub const VERTEX_COUNT: usize = 8;

/// Slot whose word is shown on the display.
pub const TOP_SLOT: Vertex = Vertex::Ubr;

/// Answer slots for the NW, NE, SE and SW clues.
pub const CENTER_COLUMN: [Vertex; 4] = [Vertex::Ubr, Vertex::Dbr, Vertex::Ufl, Vertex::Dfl];

impl Vertex {
    pub const ALL: [Vertex; VERTEX_COUNT] = [
        Vertex::Ubr,
        Vertex::Ubl,
        Vertex::Dbr,
        Vertex::Ufr,
        Vertex::Dbl,
        Vertex::Ufl,
        Vertex::Dfr,
        Vertex::Dfl,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(n: usize) -> Option<Vertex> {
        Vertex::ALL.get(n).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Vertex::Ubr => "+",
            Vertex::Ubl => "*",
            Vertex::Dbr => "^",
            Vertex::Ufr => "?",
            Vertex::Dbl => "$",
            Vertex::Ufl => ".",
            Vertex::Dfr => "|",
            Vertex::Dfl => "-",
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Vertex::Ubr => "UBR",
            Vertex::Ubl => "UBL",
            Vertex::Dbr => "DBR",
            Vertex::Ufr => "UFR",
            Vertex::Dbl => "DBL",
            Vertex::Ufl => "UFL",
            Vertex::Dfr => "DFR",
            Vertex::Dfl => "DFL",
        };
        write!(f, "{}", name)
    }
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    /// The face's corners in rotation order: a turn moves each corner one
    /// step along this list.
    pub fn cycle(self) -> [Vertex; 4] {
        use Vertex::*;
        match self {
            Face::Up => [Ubl, Ubr, Ufr, Ufl],
            Face::Down => [Dbl, Dbr, Dfr, Dfl],
            Face::Front => [Ufl, Ufr, Dfr, Dfl],
            Face::Back => [Ubl, Ubr, Dbr, Dbl],
            Face::Left => [Ubl, Ufl, Dfl, Dbl],
            Face::Right => [Ubr, Ufr, Dfr, Dbr],
        }
    }

    pub fn contains(self, vertex: Vertex) -> bool {
        self.cycle().contains(&vertex)
    }

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }

    pub fn from_letter(c: char) -> Option<Face> {
        Face::ALL
            .iter()
            .copied()
            .find(|face| face.letter() == c.to_ascii_uppercase())
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Where every corner has moved after the turns so far.
#[derive(Debug, Clone)]
pub struct PermutationTracker {
    // corner that started in slot i is now in slot permutation[i]
    permutation: [Vertex; VERTEX_COUNT],
    // slot i now holds the corner that started in slot inverse[i]
    inverse: [Vertex; VERTEX_COUNT],
    turning: Option<Face>,
}

impl Default for PermutationTracker {
    fn default() -> Self {
        PermutationTracker::new()
    }
}

impl PermutationTracker {
    pub fn new() -> PermutationTracker {
        let rv = PermutationTracker {
            permutation: Vertex::ALL,
            inverse: Vertex::ALL,
            turning: None,
        };
        rv.assert_inverse_is_valid();
        rv
    }

    pub fn turning_face(&self) -> Option<Face> {
        self.turning
    }

    pub fn is_turning(&self) -> bool {
        self.turning.is_some()
    }

    /// Returns false, and does nothing, if another turn is still running.
    pub fn begin_turn(&mut self, face: Face) -> bool {
        if self.turning.is_some() {
            return false;
        }
        self.turning = Some(face);
        true
    }

    pub fn complete_turn(&mut self) {
        let face = self
            .turning
            .take()
            .expect("complete_turn called with no turn in progress");
        self.rotate(face);
    }

    fn rotate(&mut self, face: Face) {
        let cycle = face.cycle();
        let mut next = self.permutation;
        for (k, &source) in cycle.iter().enumerate() {
            let destination = cycle[(k + 1) % cycle.len()];
            let moving = self.inverse[source.index()];
            next[moving.index()] = destination;
        }

        for vertex in Vertex::ALL {
            self.permutation[vertex.index()] = next[vertex.index()];
            self.inverse[next[vertex.index()].index()] = vertex;
        }

        self.assert_inverse_is_valid();
    }

    pub fn vertex_at_slot(&self, slot: Vertex) -> Vertex {
        self.inverse[slot.index()]
    }

    pub fn slot_of_vertex(&self, vertex: Vertex) -> Vertex {
        self.permutation[vertex.index()]
    }

    pub fn permutation(&self) -> &[Vertex; VERTEX_COUNT] {
        &self.permutation
    }

    pub fn inverse(&self) -> &[Vertex; VERTEX_COUNT] {
        &self.inverse
    }

    pub fn is_identity(&self) -> bool {
        self.permutation == Vertex::ALL
    }

    fn assert_inverse_is_valid(&self) {
        for vertex in Vertex::ALL {
            assert!(self.permutation[self.inverse[vertex.index()].index()] == vertex);
            assert!(self.inverse[self.permutation[vertex.index()].index()] == vertex);
        }
    }
}
