//! Error printing facilities.
//!
//! Every fallible step of an export run reports a [`RipError`]. The [`Error`]
//! trait describes how such a value can be converted into a simple
//! diagnostic, and [`Errors`] collects and prints them.
//!
//! [`RipError`]: enum.RipError.html
//! [`Error`]: trait.Error.html
//! [`Errors`]: struct.Errors.html

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::script;

/// An error which can be described as a diagnostic.
///
/// Types that implement `Error` must also implement [`std::fmt::Display`]. For
/// the user-displayed error to look right, this implementation should only be
/// one line long.
///
/// [`std::fmt::Display`]: https://doc.rust-lang.org/std/fmt/trait.Display.html
pub trait Error: fmt::Debug + fmt::Display {
  /// Returns a `Cause` describing the input that resulted in the error.
  fn cause(&self) -> Cause<'_>;
  /// Returns an action this error is associated with, if any at all.
  fn action(&self) -> Option<Action>;
}

/// A collection of errors that may built up over the course of an action.
///
/// The type parameter `E` should be a type implementing [`Error`].
///
/// [`Error`]: trait.Error.html
pub struct Errors<E>(Vec<E>);

impl<E> Errors<E> {
  /// Creates an empty `Errors`.
  pub fn new() -> Self {
    Errors(Vec::new())
  }

  /// Returns true if this `Errors` hasn't had any errors added yet.
  pub fn is_ok(&self) -> bool {
    self.0.is_empty()
  }

  /// Returns the number of errors collected so far.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Adds a new error to this `Errors`.
  pub fn push(&mut self, error: E) {
    self.0.push(error);
  }

  /// Extends this `Errors` by consuming another `Errors`.
  pub fn extend(&mut self, mut errors: Errors<E>) {
    self.0.reserve(errors.0.len());
    for e in errors.0.drain(..) {
      self.push(e);
    }
  }
}

impl<E> Default for Errors<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: Error> Errors<E> {
  /// Dumps this collection of errors as user-displayable text into `sink`.
  ///
  /// Returns `Ok(true)` if anything was written.
  pub fn dump_to(&self, mut sink: impl io::Write) -> io::Result<bool> {
    if self.0.is_empty() {
      return Ok(false);
    }

    for (i, error) in self.0.iter().enumerate() {
      writeln!(sink, "error: {}", error)?;
      let place = match error.cause() {
        Cause::File(path) => Some(path.display().to_string()),
        Cause::Offset(offset) => Some(format!("rom offset 0x{:05x}", offset)),
        Cause::Unknown => None,
      };
      match (error.action(), place) {
        (Some(action), Some(place)) => {
          writeln!(sink, "  while {} {}", action.describe(), place)?
        }
        (None, Some(place)) => writeln!(sink, "  at {}", place)?,
        (Some(action), None) => {
          writeln!(sink, "  while {}", action.describe())?
        }
        (None, None) => {}
      }

      if i != self.0.len() - 1 {
        writeln!(sink)?;
      }
    }

    Ok(true)
  }

  /// Calls `dump_to()` on `stderr`, exiting the process with the given
  /// `exit_code` if any errors are present.
  pub fn dump_and_die(self, code: i32) {
    // Writing to stderr is fairly unlikely to fail, so panicking is a fine
    // response here.
    if self.dump_to(io::stderr()).unwrap() {
      eprintln!();
      eprintln!("error: there were {} errors", self.0.len());
      std::process::exit(code)
    }
  }
}

/// The place where an error occured, to varrying degrees of specificity.
pub enum Cause<'a> {
  /// A file that could not be opened, read, or written.
  File(&'a Path),
  /// An absolute byte offset into the ROM image.
  Offset(u64),
  /// For when we don't know where the error came from.
  Unknown,
}

/// An action that an export run performs, which an error may be associated
/// with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
  /// Reading an input file: the ROM, the master palette, the text tables, or
  /// the configuration.
  Loading,
  /// Unpacking a table out of the ROM image.
  Decoding,
  /// Writing images and tables to the output tree.
  Exporting,
  /// Parsing or evaluating a script expression.
  Evaluating,
}

impl Action {
  fn describe(self) -> &'static str {
    match self {
      Self::Loading => "loading",
      Self::Decoding => "decoding",
      Self::Exporting => "exporting",
      Self::Evaluating => "evaluating",
    }
  }
}

/// The crate-wide error type.
///
/// The decoder has no recoverable errors: any of these aborts the run.
#[derive(Debug)]
pub enum RipError {
  /// A file could not be opened, read, created or written.
  Io {
    /// The file in question.
    path: PathBuf,
    /// What we were doing with it.
    action: Action,
    /// The underlying failure.
    source: io::Error,
  },
  /// The ROM image could not supply `len` bytes at `offset`.
  Read {
    /// The absolute offset of the read.
    offset: u64,
    /// The number of bytes requested; zero for streamed reads.
    len: usize,
    /// The underlying failure.
    source: io::Error,
  },
  /// The configuration file could not be parsed.
  Config {
    /// The configuration file.
    path: PathBuf,
    /// The parser's complaint.
    message: String,
  },
  /// A script expression could not be parsed or evaluated.
  Expr(script::Error),
}

impl RipError {
  /// Builds an error for an input file that could not be read.
  pub fn open(path: impl AsRef<Path>, source: io::Error) -> Self {
    RipError::Io {
      path: path.as_ref().to_path_buf(),
      action: Action::Loading,
      source,
    }
  }

  /// Builds an error for an output file or directory that could not be
  /// written.
  pub fn create(path: impl AsRef<Path>, source: io::Error) -> Self {
    RipError::Io {
      path: path.as_ref().to_path_buf(),
      action: Action::Exporting,
      source,
    }
  }

  /// Builds an error for a failed ROM read.
  pub fn read(offset: u64, len: usize, source: io::Error) -> Self {
    RipError::Read {
      offset,
      len,
      source,
    }
  }
}

impl fmt::Display for RipError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      RipError::Io { source, .. } => write!(f, "{}", source),
      RipError::Read { len: 0, source, .. } => {
        write!(f, "could not stream from rom: {}", source)
      }
      RipError::Read { len, source, .. } => {
        write!(f, "could not read {} bytes from rom: {}", len, source)
      }
      RipError::Config { message, .. } => {
        write!(f, "bad configuration: {}", message)
      }
      RipError::Expr(e) => write!(f, "{}", e),
    }
  }
}

impl StdError for RipError {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    match self {
      RipError::Io { source, .. } | RipError::Read { source, .. } => {
        Some(source)
      }
      RipError::Expr(e) => Some(e),
      RipError::Config { .. } => None,
    }
  }
}

impl Error for RipError {
  fn cause(&self) -> Cause<'_> {
    match self {
      RipError::Io { path, .. } | RipError::Config { path, .. } => {
        Cause::File(path)
      }
      RipError::Read { offset, .. } => Cause::Offset(*offset),
      RipError::Expr(_) => Cause::Unknown,
    }
  }

  fn action(&self) -> Option<Action> {
    match self {
      RipError::Io { action, .. } => Some(*action),
      RipError::Read { .. } => Some(Action::Decoding),
      RipError::Config { .. } => Some(Action::Loading),
      RipError::Expr(_) => Some(Action::Evaluating),
    }
  }
}

impl From<script::Error> for RipError {
  fn from(e: script::Error) -> Self {
    RipError::Expr(e)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn render(errors: &Errors<RipError>) -> String {
    let mut out = Vec::new();
    errors.dump_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
  }

  #[test]
  fn empty_dumps_nothing() {
    let errors = Errors::<RipError>::new();
    assert!(errors.is_ok());
    assert!(!errors.dump_to(Vec::new()).unwrap());
  }

  #[test]
  fn read_errors_name_the_offset() {
    let mut errors = Errors::new();
    errors.push(RipError::read(
      0x30530,
      2560,
      io::Error::from(io::ErrorKind::UnexpectedEof),
    ));
    let text = render(&errors);
    assert!(text.starts_with("error: could not read 2560 bytes from rom"));
    assert!(text.contains("while decoding rom offset 0x30530"));
  }

  #[test]
  fn io_errors_name_the_file() {
    let mut errors = Errors::new();
    errors.push(RipError::create(
      "out/Monsters.txt",
      io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    ));
    errors.push(RipError::open(
      "FFHackster.pal",
      io::Error::new(io::ErrorKind::NotFound, "missing"),
    ));
    assert_eq!(errors.len(), 2);
    let text = render(&errors);
    assert!(text.contains("while exporting out/Monsters.txt"));
    assert!(text.contains("while loading FFHackster.pal"));
  }
}
