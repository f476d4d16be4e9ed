//! Interactive wizard driving the architecture model.
//!
//! The wizard is a line-oriented REPL over five steps: context, container,
//! component, relationships, and generate. Each step accepts a small set of
//! commands; `add` and `remove` run short forms whose answers are read from
//! the same input stream, so a session can equally be driven by a person on
//! stdin or by a script file.
//!
//! The wizard owns one [`ArchitectureModel`] per session. Validation
//! refusals and precondition guidance are printed as messages and never end
//! the session; only I/O failures on the input/output streams do.

use std::{
    fmt::{self, Display},
    fs,
    io::{BufRead, Write},
    str::FromStr,
};

use log::{debug, info};

use c4forge::{C4ForgeError, DiagramBuilder, DiagramScope, DiagramType};
use c4forge_core::{
    identifier::Id,
    model::{ArchitectureModel, SystemKind},
};

/// The five wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Context,
    Container,
    Component,
    Relationships,
    Generate,
}

impl Step {
    /// Heading shown when the step is entered.
    fn title(self) -> &'static str {
        match self {
            Step::Context => "Step 1: Context Diagram",
            Step::Container => "Step 2: Container Diagram",
            Step::Component => "Step 3: Component Diagram",
            Step::Relationships => "Step 4: Relationships",
            Step::Generate => "Step 5: Generate Diagram",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Context => Some(Step::Container),
            Step::Container => Some(Step::Component),
            Step::Component => Some(Step::Relationships),
            Step::Relationships => Some(Step::Generate),
            Step::Generate => None,
        }
    }

    fn back(self) -> Option<Step> {
        match self {
            Step::Context => None,
            Step::Container => Some(Step::Context),
            Step::Component => Some(Step::Container),
            Step::Relationships => Some(Step::Component),
            Step::Generate => Some(Step::Relationships),
        }
    }
}

impl FromStr for Step {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "context" | "1" => Ok(Step::Context),
            "container" | "2" => Ok(Step::Container),
            "component" | "3" => Ok(Step::Component),
            "relationships" | "rel" | "4" => Ok(Step::Relationships),
            "generate" | "5" => Ok(Step::Generate),
            _ => Err("Unknown step"),
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::Context => "context",
            Step::Container => "container",
            Step::Component => "component",
            Step::Relationships => "relationships",
            Step::Generate => "generate",
        };
        write!(f, "{s}")
    }
}

/// A parsed wizard command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add(Option<String>),
    Remove {
        kind: Option<String>,
        index: Option<usize>,
    },
    List,
    Next,
    Back,
    Goto(Step),
    Generate,
    Save(Option<String>),
    Help,
    Quit,
}

/// Whether the session continues after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    // `save` takes the rest of the line as a path, spaces included.
    if let Some(rest) = line.strip_prefix("save") {
        if rest.is_empty() || rest.starts_with(' ') {
            let path = rest.trim();
            return Ok(Command::Save(
                (!path.is_empty()).then(|| path.to_string()),
            ));
        }
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default();
    match head {
        "add" => Ok(Command::Add(parts.next().map(str::to_string))),
        "remove" | "rm" => {
            let mut kind = None;
            let mut index = None;
            for part in parts {
                match part.parse::<usize>() {
                    Ok(n) => index = Some(n),
                    Err(_) => kind = Some(part.to_string()),
                }
            }
            Ok(Command::Remove { kind, index })
        }
        "list" | "ls" => Ok(Command::List),
        "next" => Ok(Command::Next),
        "back" | "prev" => Ok(Command::Back),
        "goto" => {
            let target = parts
                .next()
                .ok_or("Usage: goto <context|container|component|relationships|generate>")?;
            let step = target
                .parse::<Step>()
                .map_err(|err| format!("{err}: `{target}`"))?;
            Ok(Command::Goto(step))
        }
        "generate" => Ok(Command::Generate),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!(
            "Unknown command `{other}`. Type `help` for the command list."
        )),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}

/// Print a form prompt and read one answer. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<Option<String>, C4ForgeError> {
    write!(out, "{label}: ")?;
    out.flush()?;
    Ok(read_line(input)?.map(|line| line.trim().to_string()))
}

/// One interactive session over an architecture model.
pub struct Wizard {
    builder: DiagramBuilder,
    model: ArchitectureModel,
    step: Step,
    last_diagram: Option<String>,
    output_override: Option<String>,
}

impl Wizard {
    /// Create a wizard at the context step with an empty session.
    pub fn new(
        builder: DiagramBuilder,
        model: ArchitectureModel,
        output_override: Option<String>,
    ) -> Self {
        Self {
            builder,
            model,
            step: Step::Context,
            last_diagram: None,
            output_override,
        }
    }

    /// Borrow the session model.
    pub fn model(&self) -> &ArchitectureModel {
        &self.model
    }

    /// Get the current step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Get the most recently generated diagram text, if any.
    pub fn last_diagram(&self) -> Option<&str> {
        self.last_diagram.as_deref()
    }

    /// Run the session until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns `C4ForgeError::Io` when reading commands or writing messages
    /// fails. Model validation refusals are reported in-session and do not
    /// end the run.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), C4ForgeError> {
        writeln!(out, "C4 Model Diagram Generator")?;
        writeln!(out, "Type `help` for the command list.")?;
        self.show_step(out)?;

        loop {
            write!(out, "{}> ", self.step)?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!(command = line; "Dispatching command");
            match parse_command(line) {
                Err(message) => writeln!(out, "{message}")?,
                Ok(command) => {
                    if self.dispatch(command, input, out)? == Flow::Quit {
                        break;
                    }
                }
            }
        }

        info!("Session ended");
        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        match command {
            Command::Help => self.show_help(out)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Next => match self.step.next() {
                Some(step) => self.enter(step, out)?,
                None => writeln!(out, "Already at the last step.")?,
            },
            Command::Back => match self.step.back() {
                Some(step) => self.enter(step, out)?,
                None => writeln!(out, "Already at the first step.")?,
            },
            Command::Goto(step) => self.enter(step, out)?,
            Command::List => self.show_list(out)?,
            Command::Add(kind) => return self.handle_add(kind.as_deref(), input, out),
            Command::Remove { kind, index } => {
                return self.handle_remove(kind.as_deref(), index, input, out);
            }
            Command::Generate => return self.handle_generate(input, out),
            Command::Save(path) => self.handle_save(path, out)?,
        }
        Ok(Flow::Continue)
    }

    fn enter<W: Write>(&mut self, step: Step, out: &mut W) -> Result<(), C4ForgeError> {
        self.step = step;
        info!(step:? = step; "Step changed");
        self.show_step(out)
    }

    fn show_step<W: Write>(&self, out: &mut W) -> Result<(), C4ForgeError> {
        writeln!(out)?;
        writeln!(out, "{}", self.step.title())?;
        match self.step {
            Step::Container if self.model.internal_systems().next().is_none() => {
                writeln!(
                    out,
                    "You need at least one internal system to define containers. Go back with `goto context`."
                )?;
            }
            Step::Component if !self.model.has_containers() => {
                writeln!(
                    out,
                    "Please add at least one container in the container step first (`goto container`)."
                )?;
            }
            _ => {}
        }
        Ok(())
    }

    fn show_help<W: Write>(&self, out: &mut W) -> Result<(), C4ForgeError> {
        writeln!(out, "Commands:")?;
        writeln!(out, "  add [system|person]     add an entity to the current step")?;
        writeln!(out, "  remove [kind] <n>       remove entity n (1-based) from the current step")?;
        writeln!(out, "  list                    show the entities of the current step")?;
        writeln!(out, "  next / back             move between steps")?;
        writeln!(out, "  goto <step>             jump to a step by name or number")?;
        writeln!(out, "  generate                generate a diagram (generate step)")?;
        writeln!(out, "  save [path]             write the last generated diagram to a file")?;
        writeln!(out, "  help                    show this list")?;
        writeln!(out, "  quit                    end the session")?;
        Ok(())
    }

    fn show_list<W: Write>(&self, out: &mut W) -> Result<(), C4ForgeError> {
        match self.step {
            Step::Context => {
                writeln!(out, "Systems:")?;
                for (i, system) in self.model.systems().iter().enumerate() {
                    writeln!(
                        out,
                        "  {}. {} - {} ({})",
                        i + 1,
                        system.name(),
                        system.description(),
                        system.kind()
                    )?;
                }
                writeln!(out, "Persons:")?;
                for (i, person) in self.model.persons().iter().enumerate() {
                    writeln!(out, "  {}. {} - {}", i + 1, person.name(), person.description())?;
                }
            }
            Step::Container => {
                for system in self.model.internal_systems() {
                    writeln!(out, "Containers of {}:", system.name())?;
                    for (i, container) in self.model.containers_of(system.id()).iter().enumerate() {
                        writeln!(
                            out,
                            "  {}. {} - {} (Technology: {})",
                            i + 1,
                            container.name(),
                            container.description(),
                            container.technology().unwrap_or("-")
                        )?;
                    }
                }
            }
            Step::Component => {
                for system in self.model.internal_systems() {
                    for container in self.model.containers_of(system.id()) {
                        writeln!(out, "Components of {}:", container.name())?;
                        for (i, component) in
                            self.model.components_of(container.id()).iter().enumerate()
                        {
                            writeln!(
                                out,
                                "  {}. {} - {} (Technology: {})",
                                i + 1,
                                component.name(),
                                component.description(),
                                component.technology().unwrap_or("-")
                            )?;
                        }
                    }
                }
            }
            Step::Relationships => {
                writeln!(out, "Relationships:")?;
                for (i, rel) in self.model.relationships().iter().enumerate() {
                    writeln!(
                        out,
                        "  {}. {} -> {}: {}",
                        i + 1,
                        rel.source_label(),
                        rel.target_label(),
                        rel.description()
                    )?;
                }
            }
            Step::Generate => {
                writeln!(
                    out,
                    "Model: {} persons, {} systems, {} relationships.",
                    self.model.persons().len(),
                    self.model.systems().len(),
                    self.model.relationships().len()
                )?;
            }
        }
        Ok(())
    }

    fn handle_add<R: BufRead, W: Write>(
        &mut self,
        kind: Option<&str>,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        match self.step {
            Step::Context => match kind {
                Some("system") => self.add_system_form(input, out),
                Some("person") => self.add_person_form(input, out),
                _ => {
                    writeln!(out, "Specify what to add: `add system` or `add person`.")?;
                    Ok(Flow::Continue)
                }
            },
            Step::Container => self.add_container_form(input, out),
            Step::Component => self.add_component_form(input, out),
            Step::Relationships => self.add_relationship_form(input, out),
            Step::Generate => {
                writeln!(out, "Nothing to add in this step. Use `generate`.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn add_system_form<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        let Some(name) = prompt(input, out, "Name")? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = prompt(input, out, "Description")? else {
            return Ok(Flow::Quit);
        };
        let Some(kind_answer) = prompt(input, out, "Type [internal]")? else {
            return Ok(Flow::Quit);
        };

        let kind = if kind_answer.is_empty() {
            SystemKind::default()
        } else {
            match kind_answer.to_lowercase().parse::<SystemKind>() {
                Ok(kind) => kind,
                Err(_) => {
                    writeln!(out, "Expected `internal` or `external`.")?;
                    return Ok(Flow::Continue);
                }
            }
        };

        match self.model.add_system(&name, &description, kind) {
            Ok(_) => writeln!(out, "System '{name}' added successfully!")?,
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn add_person_form<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        let Some(name) = prompt(input, out, "Name")? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = prompt(input, out, "Description")? else {
            return Ok(Flow::Quit);
        };

        match self.model.add_person(&name, &description) {
            Ok(_) => writeln!(out, "Person '{name}' added successfully!")?,
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn add_container_form<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        let Some(system_id) = self.select_system(input, out)? else {
            return Ok(Flow::Continue);
        };
        let Some(system_id) = system_id else {
            return Ok(Flow::Quit);
        };

        let Some(name) = prompt(input, out, "Name")? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = prompt(input, out, "Description")? else {
            return Ok(Flow::Quit);
        };
        let Some(technology) = prompt(input, out, "Technology (optional)")? else {
            return Ok(Flow::Quit);
        };

        match self
            .model
            .add_container(system_id, &name, &description, Some(&technology))
        {
            Ok(_) => writeln!(out, "Container '{name}' added successfully!")?,
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn add_component_form<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        if !self.model.has_containers() {
            writeln!(
                out,
                "Please add at least one container in the container step first (`goto container`)."
            )?;
            return Ok(Flow::Continue);
        }

        let Some(container_id) = self.select_container(input, out)? else {
            return Ok(Flow::Continue);
        };
        let Some(container_id) = container_id else {
            return Ok(Flow::Quit);
        };

        let Some(name) = prompt(input, out, "Name")? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = prompt(input, out, "Description")? else {
            return Ok(Flow::Quit);
        };
        let Some(technology) = prompt(input, out, "Technology (optional)")? else {
            return Ok(Flow::Quit);
        };

        match self
            .model
            .add_component(container_id, &name, &description, Some(&technology))
        {
            Ok(_) => writeln!(out, "Component '{name}' added successfully!")?,
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn add_relationship_form<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        let candidates = self.model.relationship_candidates();
        if candidates.len() < 2 {
            writeln!(
                out,
                "Add at least two entities in the earlier steps first (`goto context`)."
            )?;
            return Ok(Flow::Continue);
        }

        writeln!(out, "Endpoints:")?;
        for (i, candidate) in candidates.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, candidate.label())?;
        }

        let Some(source_answer) = prompt(input, out, "Source #")? else {
            return Ok(Flow::Quit);
        };
        let Some(source) = pick(&source_answer, candidates.len()) else {
            writeln!(out, "Expected a number between 1 and {}.", candidates.len())?;
            return Ok(Flow::Continue);
        };

        let Some(target_answer) = prompt(input, out, "Target #")? else {
            return Ok(Flow::Quit);
        };
        let Some(target) = pick(&target_answer, candidates.len()) else {
            writeln!(out, "Expected a number between 1 and {}.", candidates.len())?;
            return Ok(Flow::Continue);
        };

        let Some(description) = prompt(input, out, "Description")? else {
            return Ok(Flow::Quit);
        };

        let source = &candidates[source];
        let target = &candidates[target];
        match self
            .model
            .add_relationship(source.id(), target.id(), &description)
        {
            Ok(()) => writeln!(
                out,
                "Relationship from '{}' to '{}' added successfully!",
                source.label(),
                target.label()
            )?,
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn handle_remove<R: BufRead, W: Write>(
        &mut self,
        kind: Option<&str>,
        index: Option<usize>,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        match self.step {
            Step::Context => {
                let result = match kind {
                    Some("system") => {
                        let Some(index) = self.ask_index(index, input, out)? else {
                            return Ok(Flow::Continue);
                        };
                        self.model.remove_system(index)
                    }
                    Some("person") => {
                        let Some(index) = self.ask_index(index, input, out)? else {
                            return Ok(Flow::Continue);
                        };
                        self.model.remove_person(index)
                    }
                    _ => {
                        writeln!(
                            out,
                            "Specify what to remove: `remove system <n>` or `remove person <n>`."
                        )?;
                        return Ok(Flow::Continue);
                    }
                };
                report_removal(result, out)?;
            }
            Step::Container => {
                let Some(system_id) = self.select_system(input, out)? else {
                    return Ok(Flow::Continue);
                };
                let Some(system_id) = system_id else {
                    return Ok(Flow::Quit);
                };
                let Some(index) = self.ask_index(index, input, out)? else {
                    return Ok(Flow::Continue);
                };
                report_removal(self.model.remove_container(system_id, index), out)?;
            }
            Step::Component => {
                let Some(container_id) = self.select_container(input, out)? else {
                    return Ok(Flow::Continue);
                };
                let Some(container_id) = container_id else {
                    return Ok(Flow::Quit);
                };
                let Some(index) = self.ask_index(index, input, out)? else {
                    return Ok(Flow::Continue);
                };
                report_removal(self.model.remove_component(container_id, index), out)?;
            }
            Step::Relationships => {
                let Some(index) = self.ask_index(index, input, out)? else {
                    return Ok(Flow::Continue);
                };
                report_removal(self.model.remove_relationship(index), out)?;
            }
            Step::Generate => {
                writeln!(out, "Nothing to remove in this step.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_generate<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow, C4ForgeError> {
        if self.step != Step::Generate {
            writeln!(out, "Switch to the generate step first (`goto generate`).")?;
            return Ok(Flow::Continue);
        }

        let default_type = self.builder.config().diagram().default_type();
        let Some(answer) = prompt(input, out, &format!("Diagram type [{default_type}]"))? else {
            return Ok(Flow::Quit);
        };
        let diagram_type = if answer.is_empty() {
            default_type
        } else {
            match answer.to_lowercase().parse::<DiagramType>() {
                Ok(diagram_type) => diagram_type,
                Err(_) => {
                    writeln!(out, "Expected `context`, `container`, or `component`.")?;
                    return Ok(Flow::Continue);
                }
            }
        };

        let scope = match diagram_type {
            DiagramType::Context => DiagramScope::Context,
            DiagramType::Container | DiagramType::Component => {
                if self.model.internal_systems().next().is_none() {
                    writeln!(
                        out,
                        "No internal systems available to generate container or component diagrams."
                    )?;
                    return Ok(Flow::Continue);
                }
                let Some(system_name) = prompt(input, out, "System")? else {
                    return Ok(Flow::Quit);
                };
                let Some(system) = self.model.find_internal_system_by_name(&system_name) else {
                    writeln!(out, "No internal system named `{system_name}`.")?;
                    return Ok(Flow::Continue);
                };
                let system_id = system.id();

                if diagram_type == DiagramType::Container {
                    DiagramScope::Container {
                        system: system_name,
                    }
                } else {
                    if self.model.containers_of(system_id).is_empty() {
                        writeln!(
                            out,
                            "No containers available for {system_name} to generate a component diagram."
                        )?;
                        return Ok(Flow::Continue);
                    }
                    let Some(container_name) = prompt(input, out, "Container")? else {
                        return Ok(Flow::Quit);
                    };
                    if self
                        .model
                        .find_container_by_name(system_id, &container_name)
                        .is_none()
                    {
                        writeln!(out, "No container named `{container_name}` in {system_name}.")?;
                        return Ok(Flow::Continue);
                    }
                    DiagramScope::Component {
                        system: system_name,
                        container: container_name,
                    }
                }
            }
        };

        match self.builder.render_mermaid(&self.model, &scope) {
            Ok(text) => {
                writeln!(out)?;
                out.write_all(text.as_bytes())?;
                writeln!(out)?;
                writeln!(out, "Use `save [path]` to write the diagram to a file.")?;
                info!(diagram_type:% = diagram_type; "Diagram generated");
                self.last_diagram = Some(text);
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn handle_save<W: Write>(
        &mut self,
        path: Option<String>,
        out: &mut W,
    ) -> Result<(), C4ForgeError> {
        let Some(text) = &self.last_diagram else {
            writeln!(out, "Generate a diagram first.")?;
            return Ok(());
        };

        let path = path
            .or_else(|| self.output_override.clone())
            .unwrap_or_else(|| self.builder.config().output().file_name().to_string());

        match fs::write(&path, text) {
            Ok(()) => {
                writeln!(out, "Diagram written to {path}")?;
                info!(path = path.as_str(); "Diagram saved");
            }
            Err(err) => writeln!(out, "Could not write {path}: {err}")?,
        }
        Ok(())
    }

    /// Ask for an internal system by name.
    ///
    /// Outer `None` means "stay in the loop" (bad answer already reported);
    /// inner `None` means end of input.
    fn select_system<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<Option<Id>>, C4ForgeError> {
        if self.model.internal_systems().next().is_none() {
            writeln!(
                out,
                "You need at least one internal system to define containers. Go back with `goto context`."
            )?;
            return Ok(None);
        }

        let Some(name) = prompt(input, out, "System")? else {
            return Ok(Some(None));
        };
        match self.model.find_internal_system_by_name(&name) {
            Some(system) => Ok(Some(Some(system.id()))),
            None => {
                writeln!(out, "No internal system named `{name}`. Use `list` to see systems.")?;
                Ok(None)
            }
        }
    }

    /// Ask for a system and then one of its containers, as [`select_system`].
    fn select_container<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<Option<Id>>, C4ForgeError> {
        let Some(selected) = self.select_system(input, out)? else {
            return Ok(None);
        };
        let Some(system_id) = selected else {
            return Ok(Some(None));
        };

        if self.model.containers_of(system_id).is_empty() {
            writeln!(
                out,
                "No containers defined for that system. Please add containers first (`goto container`)."
            )?;
            return Ok(None);
        }

        let Some(name) = prompt(input, out, "Container")? else {
            return Ok(Some(None));
        };
        match self.model.find_container_by_name(system_id, &name) {
            Some(container) => Ok(Some(Some(container.id()))),
            None => {
                writeln!(out, "No container named `{name}` in that system.")?;
                Ok(None)
            }
        }
    }

    /// Resolve a 1-based index, prompting when it was not given inline.
    /// `None` means the answer was missing or invalid (already reported).
    fn ask_index<R: BufRead, W: Write>(
        &self,
        given: Option<usize>,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<usize>, C4ForgeError> {
        let raw = match given {
            Some(n) => n.to_string(),
            None => match prompt(input, out, "Index")? {
                Some(answer) => answer,
                None => return Ok(None),
            },
        };
        match raw.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(zero_based) => Ok(Some(zero_based)),
            None => {
                writeln!(out, "Expected a 1-based index.")?;
                Ok(None)
            }
        }
    }
}

fn pick(answer: &str, len: usize) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

fn report_removal<W: Write>(
    result: Result<(), c4forge::ModelError>,
    out: &mut W,
) -> Result<(), C4ForgeError> {
    match result {
        Ok(()) => writeln!(out, "Removed.")?,
        Err(err) => writeln!(out, "{err}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run_script(script: &str) -> (Wizard, String) {
        let mut wizard = Wizard::new(DiagramBuilder::default(), ArchitectureModel::new(), None);
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        wizard.run(&mut input, &mut output).expect("session");
        (wizard, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            parse_command("add system"),
            Ok(Command::Add(Some("system".to_string())))
        );
        assert_eq!(
            parse_command("remove person 2"),
            Ok(Command::Remove {
                kind: Some("person".to_string()),
                index: Some(2)
            })
        );
        assert_eq!(parse_command("rm 3"), Ok(Command::Remove { kind: None, index: Some(3) }));
        assert_eq!(parse_command("goto generate"), Ok(Command::Goto(Step::Generate)));
        assert_eq!(parse_command("goto 4"), Ok(Command::Goto(Step::Relationships)));
        assert_eq!(
            parse_command("save out/shop diagram.mmd"),
            Ok(Command::Save(Some("out/shop diagram.mmd".to_string())))
        );
        assert_eq!(parse_command("save"), Ok(Command::Save(None)));
        assert!(parse_command("launch").is_err());
        assert!(parse_command("goto nowhere").is_err());
    }

    #[test]
    fn step_navigation_is_bounded() {
        assert_eq!(Step::Context.back(), None);
        assert_eq!(Step::Generate.next(), None);
        assert_eq!(Step::Context.next(), Some(Step::Container));
        assert_eq!("rel".parse::<Step>(), Ok(Step::Relationships));
    }

    #[test]
    fn add_system_and_person_through_forms() {
        let (wizard, output) = run_script(
            "add system\nShop\nOnline store\ninternal\nadd person\nAlice\nUser\nquit\n",
        );

        assert_eq!(wizard.model().systems().len(), 1);
        assert_eq!(wizard.model().systems()[0].kind(), SystemKind::Internal);
        assert_eq!(wizard.model().persons().len(), 1);
        assert!(output.contains("System 'Shop' added successfully!"));
        assert!(output.contains("Person 'Alice' added successfully!"));
    }

    #[test]
    fn empty_system_type_defaults_to_internal() {
        let (wizard, _output) = run_script("add system\nShop\nOnline store\n\nquit\n");
        assert_eq!(wizard.model().systems()[0].kind(), SystemKind::Internal);
    }

    #[test]
    fn container_step_guides_without_internal_systems() {
        let (_wizard, output) = run_script("goto container\nquit\n");
        assert!(output.contains("You need at least one internal system"));
    }

    #[test]
    fn container_form_builds_on_selected_system() {
        let script = "add system\nShop\nOnline store\ninternal\n\
                      goto container\nadd\nShop\nWeb App\nStorefront UI\nReact\nquit\n";
        let (wizard, output) = run_script(script);

        let shop = wizard.model().systems()[0].id();
        let containers = wizard.model().containers_of(shop);
        assert_eq!(containers.len(), 1);
        assert_eq!(containers[0].id(), "Shop_WebApp");
        assert_eq!(containers[0].technology(), Some("React"));
        assert!(output.contains("Container 'Web App' added successfully!"));
    }

    #[test]
    fn empty_technology_answer_is_absent() {
        let script = "add system\nShop\nOnline store\ninternal\n\
                      goto container\nadd\nShop\nDatabase\nOrder storage\n\nquit\n";
        let (wizard, _output) = run_script(script);

        let shop = wizard.model().systems()[0].id();
        assert_eq!(wizard.model().containers_of(shop)[0].technology(), None);
    }

    #[test]
    fn self_relationship_is_reported_and_ignored() {
        let script = "add system\nShop\nOnline store\ninternal\n\
                      goto relationships\nadd\n1\n1\nloops\nquit\n";
        let (wizard, output) = run_script(script);

        // Only one endpoint exists, so the form refuses before asking.
        assert!(wizard.model().relationships().is_empty());
        assert!(output.contains("Add at least two entities"));

        let script = "add system\nShop\nOnline store\ninternal\nadd person\nAlice\nUser\n\
                      goto relationships\nadd\n1\n1\nloops\nquit\n";
        let (wizard, output) = run_script(script);

        assert!(wizard.model().relationships().is_empty());
        assert!(output.contains("source and target of a relationship must differ"));
    }

    #[test]
    fn relationship_form_uses_candidate_numbers() {
        let script = "add person\nAlice\nUser\nadd system\nShop\nOnline store\ninternal\n\
                      goto relationships\nadd\n1\n2\nplaces orders on\nlist\nquit\n";
        let (wizard, output) = run_script(script);

        assert_eq!(wizard.model().relationships().len(), 1);
        assert!(output.contains("1. Person: Alice"));
        assert!(output.contains("2. System: Shop"));
        assert!(output.contains("Person: Alice -> System: Shop: places orders on"));
    }

    #[test]
    fn generate_prints_context_diagram() {
        let script = "add person\nAlice\nUser\nadd system\nShop\nOnline store\ninternal\n\
                      goto relationships\nadd\n1\n2\nplaces orders on\n\
                      goto generate\ngenerate\ncontext\nquit\n";
        let (wizard, output) = run_script(script);

        assert!(output.contains("C4Context\n"));
        assert!(output.contains("    Person(Alice, \"Alice\", \"User\")\n"));
        assert!(output.contains("    Rel(Alice, Shop, \"places orders on\")\n"));
        assert!(wizard.last_diagram().is_some());
    }

    #[test]
    fn generate_outside_generate_step_is_refused() {
        let (_wizard, output) = run_script("generate\nquit\n");
        assert!(output.contains("Switch to the generate step first"));
    }

    #[test]
    fn save_requires_a_generated_diagram() {
        let (_wizard, output) = run_script("goto generate\nsave\nquit\n");
        assert!(output.contains("Generate a diagram first."));
    }

    #[test]
    fn save_writes_the_last_diagram() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("shop.mmd");
        let script = format!(
            "add system\nShop\nOnline store\ninternal\n\
             goto generate\ngenerate\ncontext\nsave {}\nquit\n",
            path.display()
        );
        let (_wizard, output) = run_script(&script);

        assert!(output.contains("Diagram written to"));
        let saved = std::fs::read_to_string(&path).expect("saved diagram");
        assert!(saved.starts_with("C4Context\n"));
        assert!(saved.contains("System(Shop, \"Shop\", \"Online store\")"));
    }

    #[test]
    fn remove_uses_one_based_indexes() {
        let script = "add system\nFirst\nOne\ninternal\nadd system\nSecond\nTwo\ninternal\n\
                      remove system 1\nquit\n";
        let (wizard, output) = run_script(script);

        assert_eq!(wizard.model().systems().len(), 1);
        assert_eq!(wizard.model().systems()[0].name(), "Second");
        assert!(output.contains("Removed."));
    }

    #[test]
    fn remove_with_bad_index_reports_range() {
        let script = "add person\nAlice\nUser\nremove person 5\nquit\n";
        let (wizard, output) = run_script(script);

        assert_eq!(wizard.model().persons().len(), 1);
        assert!(output.contains("out of range"));
    }

    #[test]
    fn session_ends_cleanly_at_end_of_input() {
        let (_wizard, output) = run_script("add person\nAlice\nUser\n");
        assert!(output.contains("Person 'Alice' added successfully!"));
    }
}
