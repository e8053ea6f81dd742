//! The interactive menu loop.
//!
//! [`Menu`] owns the roster for the lifetime of a session and hands it back
//! through [`Menu::into_roster`] once the operator chooses Exit.

use std::io::{self, BufRead, Write};

use gradebook_core::model::Student;
use gradebook_core::roster::Roster;

use crate::prompt::Console;

const MENU: &str = "\n=== Student Grade Management System ===
1. Add Student
2. View All Students
3. Search Student by Roll No
4. Exit";

/// A main-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddStudent,
    ViewAll,
    SearchByRoll,
    Exit,
}

impl MenuChoice {
    pub fn from_selection(selection: i64) -> Option<Self> {
        match selection {
            1 => Some(MenuChoice::AddStudent),
            2 => Some(MenuChoice::ViewAll),
            3 => Some(MenuChoice::SearchByRoll),
            4 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R, W> {
    roster: Roster,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(roster: Roster, input: R, output: W) -> Self {
        Self {
            roster,
            console: Console::new(input, output),
        }
    }

    /// Run until the operator picks Exit or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.say(MENU)?;
            self.console.prompt("Choose an option: ")?;

            let Some(selection) = self.console.read_int()? else {
                tracing::debug!("input closed at main menu");
                return Ok(());
            };

            let flow = match MenuChoice::from_selection(selection) {
                Some(MenuChoice::AddStudent) => self.add_student()?,
                Some(MenuChoice::ViewAll) => self.view_all()?,
                Some(MenuChoice::SearchByRoll) => self.search()?,
                Some(MenuChoice::Exit) => {
                    self.console.say("Saving data and exiting...")?;
                    Flow::Exit
                }
                None => {
                    self.console.say("Invalid option! Try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    pub fn into_roster(self) -> Roster {
        self.roster
    }

    fn add_student(&mut self) -> io::Result<Flow> {
        self.console.prompt("Enter Roll No: ")?;
        let Some(roll_no) = self.console.read_int()? else {
            return Ok(Flow::Exit);
        };
        if self.roster.contains(roll_no) {
            self.console
                .say("Student with this roll number already exists!")?;
            return Ok(Flow::Continue);
        }

        self.console.prompt("Enter Name: ")?;
        let Some(name) = self.console.read_line()? else {
            return Ok(Flow::Exit);
        };
        let mut student = match Student::new(roll_no, name) {
            Ok(student) => student,
            Err(_) => {
                self.console.say("Name cannot be empty!")?;
                return Ok(Flow::Continue);
            }
        };

        self.console.prompt("How many subjects? ")?;
        let Some(count) = self.console.read_int()? else {
            return Ok(Flow::Exit);
        };

        let mut slot = 1;
        while slot <= count {
            self.console
                .prompt(&format!("Enter subject {slot} name: "))?;
            let Some(subject) = self.console.read_line()? else {
                return Ok(Flow::Exit);
            };
            self.console
                .prompt(&format!("Enter marks (0-100) for {subject}: "))?;
            let Some(marks) = self.console.read_int()? else {
                return Ok(Flow::Exit);
            };

            match student.add_subject(subject, marks) {
                Ok(()) => slot += 1,
                Err(e) => {
                    tracing::debug!("retrying subject slot {slot}: {e}");
                    self.console
                        .say("Invalid marks! Marks must be between 0 and 100. Try again.")?;
                }
            }
        }

        match self.roster.add(student) {
            Ok(()) => self.console.say("Student added successfully!")?,
            Err(e) => self.console.say(&format!("Could not add student: {e}"))?,
        }
        Ok(Flow::Continue)
    }

    fn view_all(&mut self) -> io::Result<Flow> {
        if self.roster.is_empty() {
            self.console.say("No students found.")?;
            return Ok(Flow::Continue);
        }
        self.console.say("\n--- All Student Records ---")?;
        for student in self.roster.all() {
            self.console.say(&student.to_string())?;
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> io::Result<Flow> {
        self.console.prompt("Enter Roll No to search: ")?;
        let Some(roll_no) = self.console.read_int()? else {
            return Ok(Flow::Exit);
        };
        match self.roster.find_by_roll(roll_no) {
            Some(student) => {
                let rendered = student.to_string();
                self.console.say("\n--- Student Found ---")?;
                self.console.say(&rendered)?;
            }
            None => {
                self.console
                    .say(&format!("Student not found with Roll No: {roll_no}"))?;
            }
        }
        Ok(Flow::Continue)
    }
}
