//! Turns makefile lines into targets.
//!
//! The extractor walks the lines once, keeping a variable table that grows
//! as assignments are seen and at most one open target. A target is closed
//! out when the next header shows up or the input ends.

use crate::parsers::{self, Header, Line};
use crate::target::{is_special_target, Target};
use crate::variable::Variables;


/// A target whose header has been seen but whose recipe may still grow
#[derive(Clone, Debug, PartialEq)]
struct OpenTarget {
    name: String,
    dependencies: Vec<String>,
    required_variables: Vec<String>,
    recipe: Vec<String>,
    line: usize,
}

impl OpenTarget {
    fn new(header: &Header, line: usize) -> Self {
        OpenTarget {
            name: header.name.to_owned(),
            dependencies: header.dependencies(),
            required_variables: Vec::new(),
            recipe: Vec::new(),
            line,
        }
    }

    /// Record one recipe line. References are collected from the raw text,
    /// before expansion, so undefined variables are still reported.
    fn push_command(&mut self, command: &str, variables: &Variables) {
        for reference in Variables::references(command) {
            if !self.required_variables.iter().any(|v| v == reference.name) {
                self.required_variables.push(reference.name.to_owned());
            }
        }
        self.recipe.push(variables.expand(command));
    }

    fn finish(self) -> Target {
        Target::new(
            self.name,
            self.dependencies,
            self.recipe.join("\n"),
            self.required_variables,
            self.line,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Current {
    /// No header seen yet, or the last one was a special target
    NoOpenTarget,
    OpenTarget(OpenTarget),
}

/// All the state for one pass over a makefile
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParserState {
    variables: Variables,
    current: Current,
    targets: Vec<Target>,
}

impl ParserState {
    pub(crate) fn new() -> Self {
        ParserState {
            variables: Variables::new(),
            current: Current::NoOpenTarget,
            targets: Vec::new(),
        }
    }

    /// Returns true if there is currently a target open
    fn currently_processing_target(&self) -> bool {
        match self.current {
            Current::OpenTarget(_) => true,
            Current::NoOpenTarget => false,
        }
    }

    fn assign(&mut self, name: &str, value: &str) {
        self.variables.assign(name, value);
    }

    /// Close out the currently open target, if there is one
    fn close_target(&mut self) {
        if let Current::OpenTarget(open) =
            std::mem::replace(&mut self.current, Current::NoOpenTarget)
        {
            self.emit(open.finish());
        }
    }

    /// Handle a header line: whatever was open is finished first
    fn open_target(&mut self, header: &Header, line: usize) {
        self.close_target();

        if is_special_target(header.name) {
            debug!("Ignoring special target {:?} on line {}", header.name, line);
            return;
        }

        debug!(
            "Opening target {:?} with dependencies {:?} on line {}",
            header.name, header.dependencies, line
        );
        self.current = Current::OpenTarget(OpenTarget::new(header, line));
    }

    fn push_command(&mut self, command: &str) {
        let variables = &self.variables;
        if let Current::OpenTarget(ref mut open) = self.current {
            open.push_command(command, variables);
        }
    }

    fn emit(&mut self, target: Target) {
        match self
            .targets
            .iter_mut()
            .find(|existing| existing.name() == target.name())
        {
            Some(existing) => {
                warn!(
                    "Overwriting target {:?} from line {} with the one from line {}",
                    target.name(),
                    existing.line(),
                    target.line()
                );
                *existing = target;
            }
            None => self.targets.push(target),
        }
    }

    /// Feed every line through the state machine
    pub(crate) fn process_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].as_ref();
            let line_number = i + 1;
            i += 1;

            match parsers::classify(line) {
                Line::Blank => {}
                Line::Assignment { name, value } => self.assign(name, value),
                Line::Header(header) => self.open_target(&header, line_number),
                Line::Recipe(command) if self.currently_processing_target() => {
                    self.push_command(command)
                }
                Line::Recipe(_) | Line::Unrecognized => {
                    if !parsers::ends_with_backslash(line) {
                        continue;
                    }

                    let (merged, consumed) = parsers::collapse_continuation(&lines[i - 1..]);
                    i += consumed - 1;

                    match parsers::parse_header(&merged) {
                        Some(header) => self.open_target(&header, line_number),
                        None => debug!(
                            "Dropping continued line starting on line {}: {:?}",
                            line_number, merged
                        ),
                    }
                }
            }
        }
    }

    /// Close any open target and hand back the targets, in order
    pub(crate) fn finish(mut self) -> Vec<Target> {
        self.close_target();
        self.targets
            .into_iter()
            .filter(|t| !t.name().trim().is_empty())
            .collect()
    }
}

/// Extract every user-invokable target from the provided makefile lines.
///
/// The lines must still carry their leading whitespace and trailing
/// backslashes. Recipes are expanded against the variables assigned above
/// them; nothing here can fail, unrecognized lines are skipped.
pub fn extract_targets<S: AsRef<str>>(lines: &[S]) -> Vec<Target> {
    let mut state = ParserState::new();
    state.process_lines(lines);
    let targets = state.finish();
    debug!("Extracted {} targets", targets.len());
    targets
}

/// Collect the final value of every variable assigned in `lines`, without
/// looking at targets at all. The last assignment to a name wins.
pub fn extract_variables<S: AsRef<str>>(lines: &[S]) -> Variables {
    let mut variables = Variables::new();

    for line in lines {
        if let Line::Assignment { name, value } = parsers::classify(line.as_ref()) {
            variables.assign(name, value);
        }
    }

    variables
}
