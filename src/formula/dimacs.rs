use crate::formula::{Clause, Formula, Literal, Problem};
use log::{debug, warn};
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip clause lines whose first token is `0` instead of reading them as empty clauses.
    pub skip_zero_lines: bool,
    /// Largest variable count accepted in the `p` line.
    pub max_variables: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            skip_zero_lines: true,
            max_variables: 1 << 24,
        }
    }
}

pub fn parse<R: Read>(reader: R) -> Result<Problem, DimacsParseError> {
    parse_with(reader, ParseOptions::default())
}

pub fn parse_file(path: impl AsRef<Path>, options: ParseOptions) -> Result<Problem, DimacsParseError> {
    let file = File::open(path)?;
    parse_with(file, options)
}

pub fn parse_with<R: Read>(reader: R, options: ParseOptions) -> Result<Problem, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut header = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim_start();
        if trimmed.starts_with('c') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace().peekable();

        match tokens.peek() {
            None => continue,
            Some(&"%") => {
                debug!("line {}: end of clause data", line_no);
                break;
            }
            Some(&"p") => {
                let _ = tokens.next();

                if header.is_some() {
                    return Err(DimacsParseError::format(line_no, "duplicate 'p' line"));
                }
                if tokens.next() != Some("cnf") {
                    return Err(DimacsParseError::format(line_no, "missing 'cnf'"));
                }

                let num_variables = tokens
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::format(line_no, "invalid num_variables"))?;
                if num_variables > options.max_variables {
                    return Err(DimacsParseError::format(
                        line_no,
                        format!("{} variables exceeds the limit of {}", num_variables, options.max_variables),
                    ));
                }

                let num_clauses = tokens
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::format(line_no, "invalid num_clauses"))?;

                header = Some((num_variables, num_clauses));
            }
            Some(&first) => {
                let num_variables = match header {
                    Some((num_variables, _)) => num_variables,
                    None => return Err(DimacsParseError::format(line_no, "missing 'p' line before clauses")),
                };

                if first == "0" && options.skip_zero_lines {
                    debug!("line {}: skipping clause line starting with 0", line_no);
                    continue;
                }

                let mut clause = vec![];
                for x in tokens {
                    match parse_literal(x, line_no)? {
                        Some(l) if l.idx() > num_variables => {
                            return Err(DimacsParseError::format(
                                line_no,
                                format!("literal {} out of range for {} variables", l, num_variables),
                            ));
                        }
                        Some(l) => clause.push(l),
                        None => break,
                    }
                }
                clauses.push(Clause::new(clause));
            }
        }
    }

    let (num_variables, num_clauses) = match header {
        Some(header) => header,
        None => return Err(DimacsParseError::Format("missing 'p' line".into())),
    };
    if clauses.len() != num_clauses {
        warn!("header declares {} clauses but {} were read", num_clauses, clauses.len());
    }

    Ok(Problem::new(num_variables, Formula::new(clauses)))
}

fn parse_literal(s: &str, line_no: usize) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<i64>()
        .map_err(|_| DimacsParseError::format(line_no, format!("invalid literal '{}'", s)))?;
    Ok(Literal::from_dimacs(l))
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl DimacsParseError {
    fn format(line_no: usize, message: impl Display) -> Self {
        Self::Format(format!("line {}: {}", line_no, message))
    }
}

impl Display for DimacsParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "I/O error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
