/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Returns the neighbouring cell one grid unit towards `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Canonical movement directions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Fixed-capacity segment buffer, head at index 0.
///
/// `length` is the logical segment count. `settled` counts the leading
/// slots that actually hold a position: after growth the new tail slot
/// stays unsettled until the next shift copies the old tail into it.
#[derive(Debug, Clone)]
pub struct Body {
    cells: Box<[Cell]>,
    length: usize,
    settled: usize,
}

impl Body {
    /// Creates a body from explicit segments (head first).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty or longer than `capacity`.
    #[must_use]
    pub fn new(segments: &[Cell], capacity: usize) -> Self {
        assert!(!segments.is_empty(), "snake body needs at least a head");
        assert!(
            segments.len() <= capacity,
            "{} segments exceed body capacity {capacity}",
            segments.len(),
        );

        let mut cells = vec![Cell::default(); capacity].into_boxed_slice();
        cells[..segments.len()].copy_from_slice(segments);

        Self {
            cells,
            length: segments.len(),
            settled: segments.len(),
        }
    }

    /// Moves every non-head segment into the slot ahead of it.
    fn shift(&mut self) {
        for i in (1..self.length).rev() {
            self.cells[i] = self.cells[i - 1];
        }
        self.settled = self.length;
    }

    /// Extends the logical length by one. The extra slot settles on the next shift.
    ///
    /// Returns `false` without growing when the buffer is already full.
    pub fn grow(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.length += 1;
        true
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        self.cells[0]
    }

    /// Returns true if a non-head settled segment sits on `cell`.
    #[must_use]
    pub fn overlaps_tail_segments(&self, cell: Cell) -> bool {
        self.cells[1..self.settled].contains(&cell)
    }

    /// Returns true if any settled segment sits on `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments().contains(&cell)
    }

    /// Logical segment count, including a not-yet-settled new tail.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.length == self.cells.len()
    }

    /// Segments that currently occupy a cell, head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Cell] {
        &self.cells[..self.settled]
    }
}

/// Snake body plus its committed and pending heading.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Body,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a snake from explicit body segments (first is head).
    #[must_use]
    pub fn from_segments(segments: &[Cell], direction: Direction, capacity: usize) -> Self {
        Self {
            body: Body::new(segments, capacity),
            direction,
            pending_direction: direction,
        }
    }

    /// Records a heading for the next move. A reversal of the committed
    /// direction is ignored; otherwise the latest request wins.
    pub fn set_direction(&mut self, requested: Direction) {
        if requested == self.direction.opposite() {
            return;
        }
        self.pending_direction = requested;
    }

    /// Shifts the body, commits the pending heading and moves the head.
    pub fn advance(&mut self) {
        self.body.shift();
        self.direction = self.pending_direction;
        self.body.cells[0] = self.body.head().offset(self.direction);
    }

    /// Returns true if the head shares a cell with any other segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        self.body.overlaps_tail_segments(self.head())
    }

    pub fn grow(&mut self) -> bool {
        self.body.grow()
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        self.body.head()
    }

    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.occupies(cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.body.is_full()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.body.capacity()
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the next move will use.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over occupied cells from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator {
        self.body.segments().iter()
    }
}
