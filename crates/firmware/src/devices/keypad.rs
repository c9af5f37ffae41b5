//! Matrix keypad driver
//!
//! Scans a keypad whose rows are inputs with pull-ups and whose columns are
//! outputs. Columns idle high; each scan drives one column low at a time and
//! reads the rows, a low row meaning the key at that crossing is pressed.
//!
//! A key is reported once per press, after it has read the same for the
//! debounce window. Holding a key does not repeat it; releasing and pressing
//! again does.

use embedded_hal::digital::{InputPin, OutputPin};
use intrusion_alarm_core::keypad::{KEYPAD_COLS, KEYPAD_LAYOUT, KEYPAD_ROWS};
use intrusion_alarm_core::traits::{KeySource, TimeSource};
use intrusion_alarm_core::Key;

use crate::platform::{GpioError, Result};

/// Time a key must read stable before it is reported (ms)
pub const DEBOUNCE_MS: u32 = 10;

/// Matrix keypad scanner
pub struct MatrixKeypad<
    R,
    C,
    T,
    const ROWS: usize = { KEYPAD_ROWS },
    const COLS: usize = { KEYPAD_COLS },
> where
    R: InputPin,
    C: OutputPin,
    T: TimeSource,
{
    rows: [R; ROWS],
    cols: [C; COLS],
    layout: [[char; COLS]; ROWS],
    time: T,
    debounce_ms: u32,
    /// Crossing read on the last scan
    candidate: Option<(usize, usize)>,
    /// When `candidate` was first read
    candidate_since_ms: u32,
    /// `candidate` already reported for this press
    reported: bool,
}

impl<R, C, T> MatrixKeypad<R, C, T>
where
    R: InputPin,
    C: OutputPin,
    T: TimeSource,
{
    /// Create a scanner for the standard 4x4 alarm keypad.
    ///
    /// # Errors
    ///
    /// Returns `GpioError::WriteFailed` if a column cannot be driven high.
    pub fn standard(rows: [R; KEYPAD_ROWS], cols: [C; KEYPAD_COLS], time: T) -> Result<Self> {
        Self::new(rows, cols, KEYPAD_LAYOUT, time)
    }
}

impl<R, C, T, const ROWS: usize, const COLS: usize> MatrixKeypad<R, C, T, ROWS, COLS>
where
    R: InputPin,
    C: OutputPin,
    T: TimeSource,
{
    /// Create a scanner with an arbitrary layout and release all columns.
    ///
    /// # Arguments
    ///
    /// * `rows` - Row inputs (pull-up)
    /// * `cols` - Column outputs
    /// * `layout` - Character printed on each key, `[row][column]`
    /// * `time` - Time source for debouncing
    ///
    /// # Errors
    ///
    /// Returns `GpioError::WriteFailed` if a column cannot be driven high.
    pub fn new(
        rows: [R; ROWS],
        cols: [C; COLS],
        layout: [[char; COLS]; ROWS],
        time: T,
    ) -> Result<Self> {
        let mut keypad = Self {
            rows,
            cols,
            layout,
            time,
            debounce_ms: DEBOUNCE_MS,
            candidate: None,
            candidate_since_ms: 0,
            reported: false,
        };
        for col in keypad.cols.iter_mut() {
            col.set_high().map_err(|_| GpioError::WriteFailed)?;
        }
        Ok(keypad)
    }

    /// Override the debounce window
    pub fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Read the matrix once.
    ///
    /// Returns the first pressed crossing in column-major order.
    pub fn scan(&mut self) -> Result<Option<(usize, usize)>> {
        for col in 0..COLS {
            self.cols[col]
                .set_low()
                .map_err(|_| GpioError::WriteFailed)?;

            let mut pressed = None;
            for row in 0..ROWS {
                if self.rows[row].is_low().map_err(|_| GpioError::ReadFailed)? {
                    pressed = Some((row, col));
                    break;
                }
            }

            self.cols[col]
                .set_high()
                .map_err(|_| GpioError::WriteFailed)?;

            if pressed.is_some() {
                return Ok(pressed);
            }
        }
        Ok(None)
    }

    /// Scan and debounce at time `now_ms`
    pub fn poll_at(&mut self, now_ms: u32) -> Result<Option<Key>> {
        let raw = self.scan()?;
        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since_ms = now_ms;
            self.reported = false;
        }

        let Some((row, col)) = self.candidate else {
            return Ok(None);
        };
        if self.reported || now_ms.wrapping_sub(self.candidate_since_ms) < self.debounce_ms {
            return Ok(None);
        }

        self.reported = true;
        Ok(Key::from_char(self.layout[row][col]))
    }
}

impl<R, C, T, const ROWS: usize, const COLS: usize> KeySource for MatrixKeypad<R, C, T, ROWS, COLS>
where
    R: InputPin,
    C: OutputPin,
    T: TimeSource,
{
    fn poll(&mut self) -> Option<Key> {
        let now_ms = self.time.now_ms();
        match self.poll_at(now_ms) {
            Ok(key) => key,
            Err(e) => {
                crate::log_warn!("Keypad scan failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use intrusion_alarm_core::traits::MockTime;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Shared wiring state: pressed crossing and currently driven column
    #[derive(Default)]
    struct Matrix {
        pressed: Cell<Option<(usize, usize)>>,
        active_col: Cell<Option<usize>>,
    }

    struct RowPin {
        matrix: Rc<Matrix>,
        row: usize,
    }

    struct ColPin {
        matrix: Rc<Matrix>,
        col: usize,
    }

    impl ErrorType for RowPin {
        type Error = Infallible;
    }

    impl InputPin for RowPin {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(!self.is_low()?)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            let connected = match (self.matrix.pressed.get(), self.matrix.active_col.get()) {
                (Some((row, col)), Some(active)) => row == self.row && col == active,
                _ => false,
            };
            Ok(connected)
        }
    }

    impl ErrorType for ColPin {
        type Error = Infallible;
    }

    impl OutputPin for ColPin {
        fn set_low(&mut self) -> core::result::Result<(), Infallible> {
            self.matrix.active_col.set(Some(self.col));
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Infallible> {
            if self.matrix.active_col.get() == Some(self.col) {
                self.matrix.active_col.set(None);
            }
            Ok(())
        }
    }

    type TestKeypad<'a> = MatrixKeypad<RowPin, ColPin, &'a MockTime>;

    fn make_keypad(time: &MockTime) -> (TestKeypad<'_>, Rc<Matrix>) {
        let matrix = Rc::new(Matrix::default());
        let rows = core::array::from_fn(|row| RowPin {
            matrix: matrix.clone(),
            row,
        });
        let cols = core::array::from_fn(|col| ColPin {
            matrix: matrix.clone(),
            col,
        });
        (MatrixKeypad::standard(rows, cols, time).unwrap(), matrix)
    }

    fn press_and_settle(
        keypad: &mut TestKeypad<'_>,
        matrix: &Matrix,
        time: &MockTime,
        c: char,
    ) -> Option<Key> {
        let (row, col) = position_of(c);
        matrix.pressed.set(Some((row, col)));
        assert_eq!(keypad.poll(), None);
        time.advance_ms(DEBOUNCE_MS as u64);
        let key = keypad.poll();
        matrix.pressed.set(None);
        keypad.poll();
        key
    }

    fn position_of(c: char) -> (usize, usize) {
        for (row, keys) in KEYPAD_LAYOUT.iter().enumerate() {
            if let Some(col) = keys.iter().position(|&k| k == c) {
                return (row, col);
            }
        }
        panic!("{c} not on keypad");
    }

    #[test]
    fn test_scan_idle() {
        let time = MockTime::new();
        let (mut keypad, matrix) = make_keypad(&time);
        assert_eq!(keypad.scan().unwrap(), None);
        assert_eq!(matrix.active_col.get(), None);
    }

    #[test]
    fn test_scan_finds_every_key() {
        let time = MockTime::new();
        let (mut keypad, matrix) = make_keypad(&time);
        for row in 0..KEYPAD_ROWS {
            for col in 0..KEYPAD_COLS {
                matrix.pressed.set(Some((row, col)));
                assert_eq!(keypad.scan().unwrap(), Some((row, col)));
                // Every column released after a scan
                assert_eq!(matrix.active_col.get(), None);
            }
        }
    }

    #[test]
    fn test_press_reported_after_debounce() {
        let time = MockTime::new();
        let (mut keypad, matrix) = make_keypad(&time);

        matrix.pressed.set(Some(position_of('#')));
        assert_eq!(keypad.poll(), None);
        time.advance_ms(5);
        assert_eq!(keypad.poll(), None);
        time.advance_ms(5);
        assert_eq!(keypad.poll(), Some(Key::Confirm));
    }

    #[test]
    fn test_held_key_reported_once() {
        let time = MockTime::new();
        let (mut keypad, matrix) = make_keypad(&time);

        matrix.pressed.set(Some(position_of('7')));
        keypad.poll();
        time.advance_ms(20);
        assert_eq!(keypad.poll(), Some(Key::Symbol('7')));
        for _ in 0..10 {
            time.advance_ms(20);
            assert_eq!(keypad.poll(), None);
        }
    }

    #[test]
    fn test_bounce_restarts_window() {
        let time = MockTime::new();
        let (mut keypad, matrix) = make_keypad(&time);

        matrix.pressed.set(Some(position_of('1')));
        keypad.poll();
        time.advance_ms(8);
        matrix.pressed.set(None);
        keypad.poll();
        matrix.pressed.set(Some(position_of('1')));
        keypad.poll();
        time.advance_ms(8);
        assert_eq!(keypad.poll(), None);
        time.advance_ms(2);
        assert_eq!(keypad.poll(), Some(Key::Symbol('1')));
    }

    #[test]
    fn test_typed_sequence() {
        let time = MockTime::new();
        let (mut keypad, matrix) = make_keypad(&time);

        let typed: Vec<Option<Key>> = "1234*0#D"
            .chars()
            .map(|c| press_and_settle(&mut keypad, &matrix, &time, c))
            .collect();
        let expected: Vec<Option<Key>> = "1234*0#D".chars().map(Key::from_char).collect();
        assert_eq!(typed, expected);
    }

    #[test]
    fn test_zero_debounce_reports_first_read() {
        let time = MockTime::new();
        let (keypad, matrix) = make_keypad(&time);
        let mut keypad = keypad.with_debounce_ms(0);

        matrix.pressed.set(Some(position_of('B')));
        assert_eq!(keypad.poll(), Some(Key::Symbol('B')));
        assert_eq!(keypad.poll(), None);
    }
}
