//! Plain-text instance encoding.
//!
//! ```text
//! <elements> <sets> <radius> <map_size>
//! <coverage row of element 0: sets space-separated 0/1>
//! ...
//! <costs of all sets>
//! <x y of element 0>
//! ...
//! <x y of set 0>
//! ...
//! ```
//!
//! The coordinate block is optional on input: a file that stops after the
//! cost row loads without [`Geometry`].

use super::{Geometry, Instance};
use crate::error::{Result, ScpError};
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

impl FromStr for Instance {
    type Err = ScpError;

    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (line_no, header) = lines.next().ok_or(ScpError::Parse {
            line: 1,
            message: "missing header".into(),
        })?;
        let header: Vec<u32> = parse_row(line_no, header)?;
        let &[elements, sets, radius, map_size] = header.as_slice() else {
            return Err(ScpError::Parse {
                line: line_no,
                message: format!("header needs 4 fields, found {}", header.len()),
            });
        };
        let (elements, sets) = (elements as usize, sets as usize);
        let mut last = line_no;

        let mut coverage = Vec::with_capacity(elements);
        for _ in 0..elements {
            let (line_no, line) = next_line(&mut lines, &mut last, "coverage row")?;
            let row: Vec<u8> = parse_row(line_no, line)?;
            if row.len() != sets {
                return Err(ScpError::Parse {
                    line: line_no,
                    message: format!("coverage row needs {sets} entries, found {}", row.len()),
                });
            }
            coverage.push(row.into_iter().map(|v| v != 0).collect());
        }

        let (line_no, line) = next_line(&mut lines, &mut last, "cost row")?;
        let costs: Vec<f64> = parse_row(line_no, line)?;

        let instance = Instance::new(coverage, costs)?;

        let Some((line_no, first)) = lines.next() else {
            return Ok(instance);
        };
        last = line_no;
        let mut element_coords = Vec::with_capacity(elements);
        element_coords.push(parse_point(line_no, first)?);
        for _ in 1..elements {
            let (line_no, line) = next_line(&mut lines, &mut last, "element coordinates")?;
            element_coords.push(parse_point(line_no, line)?);
        }
        let mut set_coords = Vec::with_capacity(sets);
        for _ in 0..sets {
            let (line_no, line) = next_line(&mut lines, &mut last, "set coordinates")?;
            set_coords.push(parse_point(line_no, line)?);
        }

        instance.with_geometry(Geometry {
            radius,
            map_size,
            element_coords,
            set_coords,
        })
    }
}

impl Instance {
    /// Reads an instance from a text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        std::fs::read_to_string(path)?.parse()
    }

    /// Writes the instance to a text file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    /// Encodes the instance in the text format.
    ///
    /// Instances without geometry are written with radius and map size 0
    /// and no coordinate block.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let (radius, map_size) = self
            .geometry()
            .map_or((0, 0), |g| (g.radius, g.map_size));
        let _ = writeln!(
            out,
            "{} {} {} {}",
            self.num_elements(),
            self.num_sets(),
            radius,
            map_size
        );
        for row in self.coverage() {
            let row: Vec<&str> = row.iter().map(|&c| if c { "1" } else { "0" }).collect();
            let _ = writeln!(out, "{}", row.join(" "));
        }
        let costs: Vec<String> = self.costs().iter().map(|c| format_cost(*c)).collect();
        let _ = writeln!(out, "{}", costs.join(" "));
        if let Some(g) = self.geometry() {
            for (x, y) in g.element_coords.iter().chain(&g.set_coords) {
                let _ = writeln!(out, "{x} {y}");
            }
        }
        out
    }
}

fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 {
        format!("{}", cost as i64)
    } else {
        format!("{cost}")
    }
}

/// Next non-empty line; at end of input the error points at `last`, the
/// last line read.
fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    last: &mut usize,
    what: &str,
) -> Result<(usize, &'a str)> {
    let (line_no, line) = lines.next().ok_or_else(|| ScpError::Parse {
        line: *last,
        message: format!("unexpected end of input, expected {what}"),
    })?;
    *last = line_no;
    Ok((line_no, line))
}

fn parse_row<T: FromStr>(line_no: usize, line: &str) -> Result<Vec<T>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse().map_err(|_| ScpError::Parse {
                line: line_no,
                message: format!("invalid number {tok:?}"),
            })
        })
        .collect()
}

fn parse_point(line_no: usize, line: &str) -> Result<(u32, u32)> {
    let values: Vec<u32> = parse_row(line_no, line)?;
    match values.as_slice() {
        &[x, y] => Ok((x, y)),
        _ => Err(ScpError::Parse {
            line: line_no,
            message: format!("expected 2 coordinates, found {}", values.len()),
        }),
    }
}
