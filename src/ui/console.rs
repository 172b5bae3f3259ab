//! Line-oriented terminal front-end
//!
//! Each line of input is one command. The page is re-rendered after every
//! command that changes something.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::calculator::Calculator;
use crate::gradebook::{SubjectField, UnknownField};
use crate::persistence::Storage;

use super::labels;
use super::view::CalculatorView;

const HELP: &str = "\
commands:
  add-semester                         학기 추가
  name <semester> <text>               학기 이름
  add-subject <semester>               과목 추가
  set <semester> <row> <field> <text>  field: name | credit | score (row starts at 1)
  reset                                데이터 초기화
  show                                 redraw
  help                                 this list
  quit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddSemester,
    Rename {
        id: u32,
        name: String,
    },
    AddSubject {
        id: u32,
    },
    Set {
        id: u32,
        index: usize,
        field: SubjectField,
        value: String,
    },
    Reset,
    Show,
    Help,
    Quit,
}

/// Why a line could not be parsed
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("{what} must be a positive number, got '{value}'")]
    BadNumber { what: &'static str, value: String },
    #[error(transparent)]
    Field(#[from] UnknownField),
}

/// Split off the first whitespace-delimited word
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Free text after the arguments: one separating space is dropped
fn rest_text(s: &str) -> String {
    s.strip_prefix(|c: char| c.is_whitespace())
        .unwrap_or(s)
        .to_string()
}

fn positive(word: &str, what: &'static str) -> Result<u32, CommandError> {
    if word.is_empty() {
        return Err(CommandError::Missing(what));
    }
    match word.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadNumber {
            what,
            value: word.to_string(),
        }),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (verb, rest) = next_word(line);
        match verb {
            "" => Err(CommandError::Empty),
            "add-semester" => Ok(Command::AddSemester),
            "name" => {
                let (id, rest) = next_word(rest);
                Ok(Command::Rename {
                    id: positive(id, "semester id")?,
                    name: rest_text(rest),
                })
            }
            "add-subject" => {
                let (id, _) = next_word(rest);
                Ok(Command::AddSubject {
                    id: positive(id, "semester id")?,
                })
            }
            "set" => {
                let (id, rest) = next_word(rest);
                let (row, rest) = next_word(rest);
                let (field, rest) = next_word(rest);
                let id = positive(id, "semester id")?;
                let row = positive(row, "row")?;
                if field.is_empty() {
                    return Err(CommandError::Missing("field"));
                }
                Ok(Command::Set {
                    id,
                    index: row as usize - 1,
                    field: field.parse()?,
                    value: rest_text(rest),
                })
            }
            "reset" => Ok(Command::Reset),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        format!("({placeholder})")
    } else {
        value.to_string()
    }
}

/// Plain-text page
pub fn render(view: &CalculatorView) -> String {
    let mut out = format!("=== {} ===\n", labels::TITLE);
    for semester in &view.semesters {
        out.push_str(&format!(
            "\n[{}] {}\n",
            semester.id,
            or_placeholder(&semester.name, labels::SEMESTER_NAME_PLACEHOLDER)
        ));
        for (row, subject) in semester.subjects.iter().enumerate() {
            let cells: Vec<String> = SubjectField::ALL
                .iter()
                .map(|&field| or_placeholder(subject.get(field), labels::placeholder(field)))
                .collect();
            out.push_str(&format!("  {}. {}\n", row + 1, cells.join(" | ")));
        }
        out.push_str(&format!("  {}\n", semester.summary));
    }
    out.push_str(&format!("\n{}\n", view.summary));
    out
}

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Help,
    Quit,
}

/// Apply one command. Storage failures are logged and the edit is kept in
/// memory.
pub fn apply<S: Storage>(calc: &mut Calculator<S>, command: Command) -> Outcome {
    let result = match command {
        Command::AddSemester => calc.add_semester().map(|_| ()),
        Command::Rename { id, name } => calc.update_semester_name(id, &name).map(|_| ()),
        Command::AddSubject { id } => calc.add_subject(id).map(|_| ()),
        Command::Set {
            id,
            index,
            field,
            value,
        } => calc.handle_input_change(id, index, field, &value).map(|_| ()),
        Command::Reset => calc.reset_data(),
        Command::Show => Ok(()),
        Command::Help => return Outcome::Help,
        Command::Quit => return Outcome::Quit,
    };
    if let Err(e) = result {
        log::error!("Failed to save grade data: {}", e);
    }
    Outcome::Redraw
}

/// Read commands until `quit` or end of input
pub fn run<S, R, W>(calc: &mut Calculator<S>, input: R, mut output: W) -> io::Result<()>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", render(&calc.view()))?;
    writeln!(output, "(type 'help' for commands)")?;

    for line in input.lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                writeln!(output, "error: {e}")?;
                continue;
            }
        };
        match apply(calc, command) {
            Outcome::Redraw => write!(output, "{}", render(&calc.view()))?,
            Outcome::Help => writeln!(output, "{HELP}")?,
            Outcome::Quit => break,
        }
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::settings::Settings;

    #[test]
    fn test_parse_commands() {
        assert_eq!("add-semester".parse::<Command>(), Ok(Command::AddSemester));
        assert_eq!(
            "name 2 2024년 2학기".parse::<Command>(),
            Ok(Command::Rename {
                id: 2,
                name: "2024년 2학기".into()
            })
        );
        assert_eq!("add-subject 1".parse::<Command>(), Ok(Command::AddSubject { id: 1 }));
        assert_eq!(
            "set 1 2 credit 3".parse::<Command>(),
            Ok(Command::Set {
                id: 1,
                index: 1,
                field: SubjectField::Credit,
                value: "3".into()
            })
        );
        assert_eq!(
            "set 1 1 name".parse::<Command>(),
            Ok(Command::Set {
                id: 1,
                index: 0,
                field: SubjectField::Name,
                value: String::new()
            })
        );
        assert_eq!("  quit\r\n".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "delete 1".parse::<Command>(),
            Err(CommandError::Unknown("delete".into()))
        );
        assert_eq!(
            "add-subject".parse::<Command>(),
            Err(CommandError::Missing("semester id"))
        );
        assert!(matches!(
            "set 1 0 name x".parse::<Command>(),
            Err(CommandError::BadNumber { what: "row", .. })
        ));
        assert!(matches!(
            "set 1 1 grade A".parse::<Command>(),
            Err(CommandError::Field(_))
        ));
    }

    #[test]
    fn test_render_blank_page() {
        let view = CalculatorView::build(&[crate::gradebook::Semester::new(1, "")]);
        let text = render(&view);
        assert!(text.starts_with("=== 학점 계산기 ==="));
        assert!(text.contains("[1] (학기 이름)"));
        assert!(text.contains("1. (과목명) | (학점) | (성적)"));
        assert!(text.contains("학점: 0 / 평균: 0.00"));
        assert!(text.contains("전체학점 0 / 전체평균 0.00"));
    }

    #[test]
    fn test_session_script() {
        let mut calc = Calculator::load(MemoryStorage::new(), &Settings::default());
        let script = "\
set 1 1 credit 3
set 1 1 score 4.0
add-subject 1
set 1 2 credit 2
set 1 2 score 3.5
bogus
add-semester
set 2 1 credit 4
quit
set 2 1 score 4.5
";
        let mut out = Vec::new();
        run(&mut calc, script.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("error: unknown command 'bogus'"));
        assert!(out.contains("학점: 5 / 평균: 3.80"));
        assert!(out.ends_with("전체학점 9 / 전체평균 2.11\n"));
        // Lines after quit are not applied
        assert_eq!(calc.semesters()[1].subjects[0].score, "");
    }

    #[test]
    fn test_reset_command_clears_storage() {
        let mut calc = Calculator::load(MemoryStorage::new(), &Settings::default());
        apply(&mut calc, Command::AddSemester);
        assert!(calc.storage().contains_key("semesters"));
        assert_eq!(apply(&mut calc, Command::Reset), Outcome::Redraw);
        assert!(!calc.storage().contains_key("semesters"));
        assert_eq!(calc.semesters().len(), 1);
    }
}
