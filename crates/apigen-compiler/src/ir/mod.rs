//! Intermediate representation of the annotated API surface.
//!
//! The frontend fills this in during a single scan of the source; the
//! validator and code generators only ever read it. Nothing here knows how
//! the source was written or how the output will be rendered.

mod api;
pub mod directive;
mod rule;

pub use api::ApiDescriptor;
pub use directive::{parse_tag, Directive, DirectiveError, Located};
pub use rule::{CheckKind, DefaultValue, FieldKind, IntType, ParameterRule};

use std::path::PathBuf;

use crate::diagnostic::Span;

/// How one argument of the business method is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// The request context, passed as `&Context` or cloned by value.
    Context { by_ref: bool },
    /// The assembled input struct.
    Params,
}

/// Call shape of the underlying business method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape {
    pub is_async: bool,
    pub args: Vec<CallArg>,
}

/// One annotated method.
#[derive(Debug, Clone)]
pub struct HandlerIR {
    /// Receiver type the method is implemented on.
    pub group: String,
    pub method_name: String,
    pub api: ApiDescriptor,
    /// Name of the input struct.
    pub params_type: String,
    /// One rule per input-struct field, in declaration order.
    pub rules: Vec<ParameterRule>,
    pub call: CallShape,
    pub span: Span,
}

impl HandlerIR {
    /// Name of the generated handler method.
    pub fn handler_name(&self) -> String {
        format!("handler_{}", self.method_name)
    }
}

/// Handlers sharing a receiver type; rendered as one dispatcher.
#[derive(Debug, Clone)]
pub struct GroupIR {
    pub name: String,
    pub handlers: Vec<HandlerIR>,
}

/// A path registered in a group's dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub group: String,
    pub path: String,
    pub handler_name: String,
}

/// Everything collected from one source file.
#[derive(Debug)]
pub struct ApiIR {
    pub source_path: PathBuf,
    /// Groups in first-seen order.
    pub groups: Vec<GroupIR>,
}

impl ApiIR {
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            source_path,
            groups: Vec::new(),
        }
    }

    /// Appends a handler to its group, creating the group on first sight.
    pub fn push_handler(&mut self, handler: HandlerIR) {
        match self.groups.iter_mut().find(|g| g.name == handler.group) {
            Some(group) => group.handlers.push(handler),
            None => self.groups.push(GroupIR {
                name: handler.group.clone(),
                handlers: vec![handler],
            }),
        }
    }

    pub fn handlers(&self) -> impl Iterator<Item = &HandlerIR> {
        self.groups.iter().flat_map(|g| g.handlers.iter())
    }

    /// Route entries in registration order.
    pub fn routes(&self) -> impl Iterator<Item = RouteEntry> + '_ {
        self.handlers().map(|h| RouteEntry {
            group: h.group.clone(),
            path: h.api.route.clone(),
            handler_name: h.handler_name(),
        })
    }
}
