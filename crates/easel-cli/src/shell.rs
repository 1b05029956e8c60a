//! Line-oriented drawing session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use dialoguer::{Input, Password};

use easel_canvas::session::CanvasHandlers;
use easel_canvas::{CanvasEvent, CanvasSession, Document, Point, ShapeKind, render};
use easel_core::config::Config;
use easel_remote::session::{LOGGED_OUT_MESSAGE, RESTORED_MESSAGE, SAVED_MESSAGE};
use easel_remote::{AppSession, PaintingStore};

const HELP: &str = "\
Commands:
  tool <circle|square|triangle|none>   select the click tool
  click <x> <y>                        place the selected tool
  drag <circle|square|triangle>        pick up a tool from the toolbar
  drop <x> <y>                         place the dragged tool
  delete <id>                          remove a shape
  title <text>                         rename the painting
  pan <dx> <dy> | zoom <factor>        move the view
  list | counts                        show shapes
  render [file.svg]                    print or write SVG
  export [dir] | import <file.json>    painting files
  signup <user> | login <user>         authenticate (password is prompted)
  logout | save | restore              remote painting
  help | quit";

pub struct Shell {
    session: AppSession,
    handlers: CanvasHandlers,
}

impl Shell {
    pub fn new(config: &Config, store: Arc<dyn PaintingStore>) -> Self {
        let tool = config.default_tool().parse::<ShapeKind>().ok();
        let canvas = CanvasSession::new(Document::new(config.default_title()), tool);
        Self {
            session: AppSession::new(canvas, store),
            handlers: CanvasSession::default_handlers(),
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("Easel. Type 'help' for commands.");
        loop {
            let line: String = match Input::new()
                .with_prompt(self.prompt())
                .allow_empty(true)
                .interact_text()
            {
                Ok(line) => line,
                // EOF or closed terminal
                Err(_) => break,
            };
            if !self.run_line(&line).await {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        match self.session.credential() {
            Some(c) => format!("{}@{}", c.username, self.session.canvas.document.title),
            None => self.session.canvas.document.title.clone(),
        }
    }

    /// Run one command line. Returns false when the session should end.
    pub async fn run_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        if matches!(cmd, "quit" | "exit") {
            return false;
        }
        if let Err(e) = self.execute(cmd, rest).await {
            eprintln!("{e}");
        }
        true
    }

    fn dispatch(&mut self, event: CanvasEvent) {
        let before = self.session.canvas.document.len();
        self.handlers.dispatch(&mut self.session.canvas, &event);
        let doc = &self.session.canvas.document;
        if doc.len() > before {
            if let Some(shape) = doc.shapes.last() {
                println!("{} {} at ({}, {})", shape.kind, shape.id, shape.x, shape.y);
            }
        }
    }

    async fn execute(&mut self, cmd: &str, rest: &str) -> anyhow::Result<()> {
        match cmd {
            "" => {}
            "help" => println!("{HELP}"),
            "tool" => {
                let kind = match rest {
                    "none" | "" => None,
                    other => Some(parse_kind(other)?),
                };
                self.dispatch(CanvasEvent::SelectTool { kind });
            }
            "click" => {
                if self.session.canvas.selected.is_none() {
                    bail!("No tool selected.");
                }
                let at = parse_point(rest)?;
                self.dispatch(CanvasEvent::Click { at });
            }
            "drag" => {
                let kind = parse_kind(rest)?;
                self.dispatch(CanvasEvent::DragStart { kind });
            }
            "drop" => {
                if self.session.canvas.dragged.is_none() {
                    bail!("Nothing is being dragged.");
                }
                let at = parse_point(rest)?;
                self.dispatch(CanvasEvent::Drop { at });
            }
            "delete" => {
                if self.session.canvas.document.get(rest).is_none() {
                    bail!("No shape with id '{rest}'.");
                }
                self.dispatch(CanvasEvent::DoubleClick {
                    id: rest.to_string(),
                });
            }
            "title" => {
                self.dispatch(CanvasEvent::SetTitle {
                    title: rest.to_string(),
                });
            }
            "pan" => {
                let delta = parse_point(rest)?;
                self.session.canvas.viewport.pan(delta.x, delta.y);
            }
            "zoom" => {
                let factor: f64 = rest.parse().context("zoom expects a number")?;
                if !factor.is_finite() {
                    bail!("zoom expects a finite number");
                }
                self.session.canvas.viewport.set_zoom(factor);
                println!("zoom {}", self.session.canvas.viewport.zoom);
            }
            "list" => {
                let doc = &self.session.canvas.document;
                println!("{} ({} shapes)", doc.title, doc.len());
                for shape in &doc.shapes {
                    println!("  {:<8} {} ({}, {})", shape.kind, shape.id, shape.x, shape.y);
                }
            }
            "counts" => {
                let counts = self.session.canvas.document.counts();
                for kind in ShapeKind::ALL {
                    println!("{kind}: {}", counts.get(kind));
                }
            }
            "render" => {
                let svg = render::render_document(&self.session.canvas.document);
                if rest.is_empty() {
                    println!("{svg}");
                } else {
                    tokio::fs::write(rest, svg).await?;
                    println!("Wrote {rest}");
                }
            }
            "export" => {
                let dir = if rest.is_empty() { Path::new(".") } else { Path::new(rest) };
                let path = self.session.export_to_dir(dir).await?;
                println!("Exported {}", path.display());
            }
            "import" => {
                self.session.import_file(&PathBuf::from(rest)).await?;
                let doc = &self.session.canvas.document;
                println!("Imported {} ({} shapes)", doc.title, doc.len());
            }
            "signup" | "login" => {
                let username = rest.to_string();
                let password = Password::new().with_prompt("Password").interact()?;
                let outcome = if cmd == "signup" {
                    self.session.signup(&username, &password).await?
                } else {
                    self.session.login(&username, &password).await?
                };
                println!("{}", outcome.message());
            }
            "logout" => {
                self.session.logout();
                println!("{LOGGED_OUT_MESSAGE}");
            }
            "save" => {
                self.session.save().await?;
                println!("{SAVED_MESSAGE}");
            }
            "restore" => {
                self.session.restore().await?;
                println!("{RESTORED_MESSAGE}");
            }
            other => bail!("Unknown command '{other}'. Type 'help' for commands."),
        }
        Ok(())
    }
}

fn parse_kind(s: &str) -> anyhow::Result<ShapeKind> {
    s.parse::<ShapeKind>().map_err(anyhow::Error::msg)
}

fn parse_point(s: &str) -> anyhow::Result<Point> {
    let mut parts = s.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => {
            Ok(Point::new(x, y))
        }
        _ => bail!("expected two numbers, got '{s}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let p = parse_point("10 -2.5").unwrap();
        assert_eq!((p.x, p.y), (10.0, -2.5));
        assert!(parse_point("10").is_err());
        assert!(parse_point("1 2 3").is_err());
        assert!(parse_point("a b").is_err());
        assert!(parse_point("NaN 1").is_err());
        assert!(parse_point("1 inf").is_err());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("Square").unwrap(), ShapeKind::Square);
        assert!(parse_kind("hexagon").is_err());
    }
}
