use std::io::{self, Write};

use fsa_automata::{Automaton, FormatError};
use fsa_regexp::{ArityError, RegularExpression, SyntaxError};
use log::debug;

/// Error returned when a console command cannot be carried out. None of them end the session.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid command {0:?}")]
    InvalidCommand(String),

    #[error("{command}: missing argument <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: unexpected argument {argument:?}")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error("{0:?} is not an automaton handle")]
    InvalidHandle(String),

    #[error("no automaton #{0}")]
    UnknownHandle(usize),

    #[error("the result would have {states} states, at most {limit} are supported")]
    TooManyStates { states: usize, limit: usize },

    #[error("could not open file {path:?}: {source}")]
    Open { path: String, source: FormatError },

    #[error("could not save file {path:?}: {source}")]
    Save { path: String, source: io::Error },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Arity(#[from] ArityError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// A console command, named case-insensitively on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Command {
    Open,
    List,
    Print,
    Save,
    Empty,
    Deterministic,
    Recognize,
    Union,
    Concat,
    Star,
    Regex,
    Dfa,
    Finite,
    Min,
    Exit,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "open" => Command::Open,
            "list" => Command::List,
            "print" => Command::Print,
            "save" => Command::Save,
            "empty" => Command::Empty,
            "deterministic" => Command::Deterministic,
            "recognize" => Command::Recognize,
            "union" => Command::Union,
            "concat" => Command::Concat,
            "un" => Command::Star,
            "reg" => Command::Regex,
            "dfa" => Command::Dfa,
            "finite" => Command::Finite,
            "min" => Command::Min,
            "exit" => Command::Exit,
            _ => return None,
        };
        Some(command)
    }

    fn name(self) -> &'static str {
        match self {
            Command::Open => "open",
            Command::List => "list",
            Command::Print => "print",
            Command::Save => "save",
            Command::Empty => "empty",
            Command::Deterministic => "deterministic",
            Command::Recognize => "recognize",
            Command::Union => "union",
            Command::Concat => "concat",
            Command::Star => "un",
            Command::Regex => "reg",
            Command::Dfa => "dfa",
            Command::Finite => "finite",
            Command::Min => "min",
            Command::Exit => "exit",
        }
    }
}

/// What the caller should do after a command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Arguments of a single command line.
struct Args<'a> {
    command: &'static str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, argument: &'static str) -> CommandResult<&'a str> {
        self.words.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    fn handle(&mut self, argument: &'static str) -> CommandResult<usize> {
        let word = self.word(argument)?;
        word.parse()
            .map_err(|_| CommandError::InvalidHandle(word.to_owned()))
    }

    fn finish(mut self) -> CommandResult<()> {
        match self.words.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument {
                command: self.command,
                argument: extra.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

/// The automata created during a console session, addressed by the order they were created
/// in.
#[derive(Debug, Default)]
pub struct Session {
    automata: Vec<Automaton>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, id: usize) -> CommandResult<&Automaton> {
        self.automata.get(id).ok_or(CommandError::UnknownHandle(id))
    }

    fn get_mut(&mut self, id: usize) -> CommandResult<&mut Automaton> {
        self.automata
            .get_mut(id)
            .ok_or(CommandError::UnknownHandle(id))
    }

    /// Refuse to build an automaton with more states than a description may declare.
    fn check_size(states: usize) -> CommandResult<()> {
        if states > Automaton::MAX_STATES {
            Err(CommandError::TooManyStates {
                states,
                limit: Automaton::MAX_STATES,
            })
        } else {
            Ok(())
        }
    }

    fn register<W: Write>(&mut self, automaton: Automaton, out: &mut W) -> CommandResult<()> {
        debug!(
            "registering automaton #{} with {} states",
            self.automata.len(),
            automaton.states()
        );
        self.automata.push(automaton);
        writeln!(out, "Automaton #{} created successfully", self.automata.len() - 1)?;
        Ok(())
    }

    /// Run one command line, writing its output to `out`. Blank lines do nothing. A failed
    /// command leaves the session unchanged.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> CommandResult<Flow> {
        let mut words = line.split_whitespace();
        let name = match words.next() {
            Some(name) => name.to_lowercase(),
            None => return Ok(Flow::Continue),
        };

        let command = match Command::from_name(&name) {
            Some(command) => command,
            None => return Err(CommandError::InvalidCommand(name)),
        };
        let mut args = Args {
            command: command.name(),
            words,
        };

        match command {
            Command::Open => {
                let path = args.word("path")?;
                args.finish()?;
                let automaton = Automaton::open(path).map_err(|source| {
                    CommandError::Open {
                        path: path.to_owned(),
                        source,
                    }
                })?;
                writeln!(out, "File {:?} loaded successfully", path)?;
                self.register(automaton, out)?;
            }
            Command::List => {
                args.finish()?;
                let ids: Vec<String> = (0..self.automata.len()).map(|i| i.to_string()).collect();
                writeln!(out, "{}", ids.join(" "))?;
            }
            Command::Print => {
                let id = args.handle("id")?;
                args.finish()?;
                write!(out, "{}", self.get(id)?)?;
            }
            Command::Save => {
                let id = args.handle("id")?;
                let path = args.word("path")?;
                args.finish()?;
                self.get(id)?.save(path).map_err(|source| CommandError::Save {
                    path: path.to_owned(),
                    source,
                })?;
                writeln!(out, "Success")?;
            }
            Command::Empty => {
                let id = args.handle("id")?;
                args.finish()?;
                writeln!(out, "{}", self.get(id)?.accepts_empty_lang())?;
            }
            Command::Deterministic => {
                let id = args.handle("id")?;
                args.finish()?;
                writeln!(out, "{}", self.get(id)?.is_deterministic())?;
            }
            Command::Recognize => {
                let id = args.handle("id")?;
                let word = args.word("word")?;
                args.finish()?;
                writeln!(out, "{}", self.get(id)?.accepts(word))?;
            }
            Command::Union | Command::Concat => {
                let left = args.handle("id")?;
                let right = args.handle("id")?;
                args.finish()?;
                let (left, right) = (self.get(left)?, self.get(right)?);
                Self::check_size(left.states().saturating_add(right.states()).saturating_add(1))?;
                let automaton = if command == Command::Union {
                    left.union(right)
                } else {
                    left.concatenation(right)
                };
                self.register(automaton, out)?;
            }
            Command::Star => {
                let id = args.handle("id")?;
                args.finish()?;
                let operand = self.get(id)?;
                Self::check_size(operand.states().saturating_add(1))?;
                let automaton = operand.kleene_star();
                self.register(automaton, out)?;
            }
            Command::Regex => {
                let expr = args.word("regex")?;
                args.finish()?;
                let automaton = RegularExpression::new(expr)?.to_nfa()?;
                self.register(automaton, out)?;
            }
            Command::Dfa => {
                let id = args.handle("id")?;
                args.finish()?;
                self.get_mut(id)?.convert_to_dfa();
                writeln!(out, "Success")?;
            }
            Command::Finite => {
                let id = args.handle("id")?;
                args.finish()?;
                writeln!(out, "{}", self.get(id)?.accepts_finite_lang())?;
            }
            Command::Min => {
                let id = args.handle("id")?;
                args.finish()?;
                self.get_mut(id)?.minimize();
                writeln!(out, "Success")?;
            }
            Command::Exit => {
                args.finish()?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        session.execute(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_regex_commands() {
        let mut session = Session::new();
        assert_eq!("Automaton #0 created successfully\n", run(&mut session, "reg (a|b)*c"));
        assert_eq!("Automaton #1 created successfully\n", run(&mut session, "REG ab"));
        assert_eq!("0 1\n", run(&mut session, "list"));

        assert_eq!("true\n", run(&mut session, "recognize 0 abbac"));
        assert_eq!("false\n", run(&mut session, "Recognize 0 abba"));
        assert_eq!("false\n", run(&mut session, "deterministic 0"));
        assert_eq!("false\n", run(&mut session, "finite 0"));
        assert_eq!("true\n", run(&mut session, "finite 1"));
        assert_eq!("false\n", run(&mut session, "empty 1"));

        assert_eq!("Automaton #2 created successfully\n", run(&mut session, "union 0 1"));
        assert_eq!("Automaton #3 created successfully\n", run(&mut session, "concat 1 1"));
        assert_eq!("Automaton #4 created successfully\n", run(&mut session, "un 1"));
        assert_eq!("true\n", run(&mut session, "recognize 2 ab"));
        assert_eq!("true\n", run(&mut session, "recognize 3 abab"));
        assert_eq!("true\n", run(&mut session, "recognize 4 E"));

        assert_eq!("Success\n", run(&mut session, "min 0"));
        assert_eq!("true\n", run(&mut session, "deterministic 0"));
        assert_eq!("true\n", run(&mut session, "recognize 0 c"));
        assert_eq!("Success\n", run(&mut session, "dfa 4"));
        assert_eq!("true\n", run(&mut session, "deterministic 4"));
    }

    fn description_file(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("fsa-{}-{}.txt", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_star_of_minimized_rejecting_automaton() {
        let path = description_file("rejecting", "2 1\n1\n2\n0 a 0\n1 a 1\n");
        let mut session = Session::new();
        run(&mut session, &format!("open {}", path));

        assert_eq!("true\n", run(&mut session, "empty 0"));
        assert_eq!("Success\n", run(&mut session, "min 0"));
        assert_eq!("Automaton #1 created successfully\n", run(&mut session, "un 0"));
        assert_eq!("true\n", run(&mut session, "deterministic 1"));
        assert_eq!("true\n", run(&mut session, "recognize 1 E"));
    }

    #[test]
    fn test_state_counts_are_bounded() {
        let mut session = Session::new();
        let mut out = Vec::new();

        let path = description_file("huge", &format!("{} 0\n0\n", usize::MAX));
        assert!(matches!(
            session.execute(&format!("open {}", path), &mut out),
            Err(CommandError::Open {
                source: FormatError::TooManyStates { .. },
                ..
            })
        ));

        let path = description_file("largest", &format!("{} 0\n0\n", Automaton::MAX_STATES));
        run(&mut session, &format!("open {}", path));
        assert!(matches!(
            session.execute("union 0 0", &mut out),
            Err(CommandError::TooManyStates { .. })
        ));
        assert!(matches!(
            session.execute("un 0", &mut out),
            Err(CommandError::TooManyStates { .. })
        ));
        assert_eq!(1, session.automata.len());
        assert_eq!("true\n", run(&mut session, "empty 0"));
    }

    #[test]
    fn test_print() {
        let mut session = Session::new();
        run(&mut session, "reg a");
        assert_eq!(session.automata[0].to_string(), run(&mut session, "print 0"));
    }

    #[test]
    fn test_errors_keep_session() {
        let mut session = Session::new();
        let mut out = Vec::new();

        assert!(matches!(
            session.execute("frobnicate", &mut out),
            Err(CommandError::InvalidCommand(_))
        ));
        assert!(matches!(
            session.execute("print 0", &mut out),
            Err(CommandError::UnknownHandle(0))
        ));
        assert!(matches!(
            session.execute("print x", &mut out),
            Err(CommandError::InvalidHandle(_))
        ));
        assert!(matches!(
            session.execute("reg", &mut out),
            Err(CommandError::MissingArgument { .. })
        ));
        assert!(matches!(
            session.execute("reg a|", &mut out),
            Err(CommandError::Syntax(_))
        ));
        assert!(matches!(
            session.execute("list 1", &mut out),
            Err(CommandError::UnexpectedArgument { .. })
        ));
        assert!(matches!(
            session.execute("open /nonexistent/automaton.txt", &mut out),
            Err(CommandError::Open { .. })
        ));
        assert!(out.is_empty());
        assert!(session.automata.is_empty());

        assert_eq!(Flow::Continue, session.execute("   ", &mut out).unwrap());
        assert_eq!(Flow::Exit, session.execute("EXIT", &mut out).unwrap());
    }
}
