//! Interactive read-eval-render loop over a [`CourseSession`].

use super::command::{parse_command, TourCommand, HELP};
use super::render::{render_menu, render_screen};
use crate::domain::course::Course;
use crate::domain::error::AcademyError;
use crate::domain::session::{CourseSession, Event};
use crate::ports::console_port::ConsolePort;

pub const PROMPT: &str = "> ";

/// Runs the tour until `quit` or end of input. Bad commands are reported
/// on the console and the loop continues; only console I/O failures end it
/// with an error.
pub fn run_tour(
    console: &mut dyn ConsolePort,
    course: &Course,
    session: &mut CourseSession,
) -> Result<(), AcademyError> {
    console.write(&render_screen(course, session))?;

    while let Some(line) = console.read_line(PROMPT)? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                console.write(&format!("error: {e}\n"))?;
                continue;
            }
        };

        match command {
            TourCommand::Quit => break,
            TourCommand::Help => console.write(HELP)?,
            TourCommand::Menu => {
                console.write(&render_menu(session.completed(), session.current()))?
            }
            TourCommand::Apply(action) => match session.apply(course, action) {
                Ok(event) => {
                    if let Event::ModuleCompleted(section) = event {
                        let completed = session.completed();
                        console.write(&format!(
                            "\n*** {} complete ({}/{} modules) ***\n",
                            section.title(),
                            completed.count(),
                            completed.total()
                        ))?;
                        if completed.is_course_complete() {
                            console.write("*** Congratulations, you finished the course! ***\n")?;
                        }
                    }
                    if event != Event::Unchanged {
                        console.write("\n")?;
                        console.write(&render_screen(course, session))?;
                    }
                }
                Err(e) => console.write(&format!("error: {e}\n"))?,
            },
        }
    }

    let completed = session.completed();
    tracing::info!(completed = completed.count(), "tour finished");
    console.write(&format!(
        "Progress: {}/{} modules completed. Goodbye!\n",
        completed.count(),
        completed.total()
    ))?;
    Ok(())
}
