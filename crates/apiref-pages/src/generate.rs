//! Per-entity page assembly and recursive page scheduling.

use apiref_markup::{MarkupBuilder, MarkupNode};
use apiref_model::{ApiEntity, ApiModel, DocNode, EntityKind, EntityPath};

use crate::diagnostics::Diagnostics;
use crate::error::GenerateError;
use crate::routes;
use crate::sink::PageSink;
use crate::translate::DocTranslator;

/// A table cell: an ordered sequence of pre-assembled nodes.
type Cell = Vec<MarkupNode>;
/// One table row.
type Row = Vec<Cell>;

/// The entities rendered onto one output page.
///
/// Usually a single entity; a same-named interface/namespace sibling pair
/// merges onto one page (they jointly describe one symbol), with the
/// interface as the primary entity and the namespace absorbed.
struct PageUnit<'a> {
    entities: Vec<&'a ApiEntity>,
}

impl<'a> PageUnit<'a> {
    fn single(entity: &'a ApiEntity) -> Self {
        Self {
            entities: vec![entity],
        }
    }

    fn merged(interface: &'a ApiEntity, namespace: &'a ApiEntity) -> Self {
        Self {
            entities: vec![interface, namespace],
        }
    }

    fn primary(&self) -> &'a ApiEntity {
        self.entities[0]
    }
}

/// Walks the entity tree depth-first and emits one page per page unit.
///
/// Generation for an entity recursively triggers generation of every listed
/// member before returning; no state crosses page boundaries, and the first
/// fatal error aborts the whole run.
pub struct PageGenerator<'a> {
    model: &'a ApiModel,
    sink: &'a mut dyn PageSink,
    diagnostics: &'a dyn Diagnostics,
    styles: Vec<String>,
}

impl<'a> PageGenerator<'a> {
    /// Create a generator writing pages to `sink`.
    pub fn new(
        model: &'a ApiModel,
        sink: &'a mut dyn PageSink,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            model,
            sink,
            diagnostics,
            styles: vec!["./apiref.css".to_owned()],
        }
    }

    /// Replace the stylesheet hrefs linked from every page.
    #[must_use]
    pub fn with_styles(mut self, styles: Vec<String>) -> Self {
        self.styles = styles;
        self
    }

    /// Generate the full page set.
    ///
    /// # Errors
    ///
    /// Fatal per the error policy: malformed doc-comment HTML, unsupported
    /// doc node kinds, entity kinds violating the model contract, and sink
    /// write failures all abort the run.
    pub fn run(&mut self) -> Result<(), GenerateError> {
        let unit = PageUnit::single(self.model.root());
        self.generate_unit(&unit, &EntityPath::root())
    }

    fn generate_unit(&mut self, unit: &PageUnit<'a>, path: &EntityPath) -> Result<(), GenerateError> {
        let primary = unit.primary();
        let translator = DocTranslator::new(self.model, self.diagnostics);
        let mut builder = MarkupBuilder::new();
        for href in &self.styles {
            builder.add_style(href.clone());
        }

        self.emit_header(&mut builder)?;
        builder.open(MarkupNode::element("main"));
        emit_breadcrumbs(&mut builder, path)?;
        builder.append(MarkupNode::text_element("h1", heading_text(primary, path)?));

        if unit.entities.iter().any(|e| e.release.is_prerelease()) {
            emit_stability_banner(&mut builder)?;
        }

        for &entity in &unit.entities {
            if let Some(doc) = &entity.doc {
                let context = entity_context(entity, primary, path);
                translator.translate_nodes(&mut builder, &doc.summary, &context)?;
            }
        }

        emit_signatures(&mut builder, unit);

        for &entity in &unit.entities {
            if let Some(remarks) = entity.doc.as_ref().and_then(|d| d.remarks.as_ref()) {
                let context = entity_context(entity, primary, path);
                builder.append(MarkupNode::text_element("h2", "Remarks"));
                translator.translate_nodes(&mut builder, remarks, &context)?;
            }
        }

        let mut scheduled: Vec<(PageUnit<'a>, EntityPath)> = Vec::new();
        for &entity in &unit.entities {
            let context = entity_context(entity, primary, path);
            match entity.kind {
                EntityKind::Model | EntityKind::Package | EntityKind::Namespace => {
                    self.container_body(&mut builder, entity, &context, &mut scheduled)?;
                }
                EntityKind::Class => {
                    self.class_body(&mut builder, entity, &context, &mut scheduled)?;
                }
                EntityKind::Interface => {
                    self.interface_body(&mut builder, entity, &context, &mut scheduled)?;
                }
                EntityKind::Enum => {
                    self.enum_body(&mut builder, entity, &context)?;
                }
                EntityKind::Function
                | EntityKind::Method
                | EntityKind::MethodSignature
                | EntityKind::Constructor
                | EntityKind::ConstructSignature => {
                    self.callable_body(&mut builder, entity, &context)?;
                }
                EntityKind::Property
                | EntityKind::PropertySignature
                | EntityKind::TypeAlias
                | EntityKind::Variable => {}
                EntityKind::EnumMember | EntityKind::EntryPoint => {
                    return Err(GenerateError::UnexpectedKind {
                        kind: entity.kind,
                        context: format!("page body for {path}"),
                    });
                }
            }
        }

        builder.close("main")?;
        let html = builder.emit()?;
        let filename = routes::filename_for(path);
        self.sink.write_page(&filename, &html)?;
        self.diagnostics.page_generated(&filename);

        for (child_unit, child_path) in scheduled {
            self.generate_unit(&child_unit, &child_path)?;
        }
        Ok(())
    }

    /// Site chrome above the main container. Static content.
    fn emit_header(&self, builder: &mut MarkupBuilder) -> Result<(), GenerateError> {
        builder.open_with(MarkupNode::element("header"), |b| {
            b.append(
                MarkupNode::void_element("img")
                    .attr("class", "site-logo")
                    .attr("src", "./apiref-logo.svg")
                    .attr("alt", "logo"),
            );
            b.append(
                MarkupNode::text_element("a", "API Reference")
                    .attr("class", "site-title")
                    .attr("href", "./index.html"),
            );
            Ok(())
        })
    }

    /// Container body: partition direct members into fixed categories,
    /// render a summary table per category holding more than one entry, and
    /// schedule a page for every listed member.
    fn container_body(
        &self,
        builder: &mut MarkupBuilder,
        entity: &'a ApiEntity,
        path: &EntityPath,
        scheduled: &mut Vec<(PageUnit<'a>, EntityPath)>,
    ) -> Result<(), GenerateError> {
        let members = listed_members(entity, path);
        let units = merge_units(&members);

        let mut packages: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();
        let mut classes: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();
        let mut exceptions: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();
        let mut enums: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();
        let mut functions: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();
        let mut interfaces: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();
        let mut namespaces: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();
        let mut variables: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();
        let mut type_aliases: Vec<&(PageUnit<'a>, EntityPath)> = Vec::new();

        for entry in &units {
            let member = entry.0.primary();
            match member.kind {
                EntityKind::Package => packages.push(entry),
                EntityKind::Class => {
                    if member.is_exception_class() {
                        exceptions.push(entry);
                    } else {
                        classes.push(entry);
                    }
                }
                EntityKind::Enum => enums.push(entry),
                EntityKind::Function => functions.push(entry),
                EntityKind::Interface => interfaces.push(entry),
                EntityKind::Namespace => namespaces.push(entry),
                EntityKind::Variable => variables.push(entry),
                EntityKind::TypeAlias => type_aliases.push(entry),
                kind => {
                    return Err(GenerateError::UnexpectedKind {
                        kind,
                        context: format!("members of container {path}"),
                    });
                }
            }
        }

        let categories: [(&str, &str, &[&(PageUnit<'a>, EntityPath)]); 9] = [
            ("Packages", "Package", &packages),
            ("Classes", "Class", &classes),
            ("Exceptions", "Exception", &exceptions),
            ("Enumerations", "Enumeration", &enums),
            ("Functions", "Function", &functions),
            ("Interfaces", "Interface", &interfaces),
            ("Namespaces", "Namespace", &namespaces),
            ("Variables", "Variable", &variables),
            ("Type Aliases", "Type Alias", &type_aliases),
        ];

        let translator = DocTranslator::new(self.model, self.diagnostics);
        for (title, column, entries) in categories {
            // A category table appears only when it would hold more than
            // one row.
            if entries.len() <= 1 {
                continue;
            }
            builder.append(MarkupNode::text_element("h2", title));
            let mut rows: Vec<Row> = Vec::new();
            for (member_unit, member_path) in entries {
                rows.push(vec![
                    name_link_cell(member_unit.primary(), member_path),
                    description_cell(&translator, member_unit.primary(), member_path)?,
                ]);
            }
            emit_table(builder, &[column, "Description"], rows)?;
        }

        // Pages are scheduled for every listed member, whether or not its
        // category table was suppressed.
        scheduled.extend(units);
        Ok(())
    }

    /// Class body: events, constructors, properties, and methods tables,
    /// each with a modifiers column.
    fn class_body(
        &self,
        builder: &mut MarkupBuilder,
        entity: &'a ApiEntity,
        path: &EntityPath,
        scheduled: &mut Vec<(PageUnit<'a>, EntityPath)>,
    ) -> Result<(), GenerateError> {
        let mut events: Vec<&'a ApiEntity> = Vec::new();
        let mut constructors: Vec<&'a ApiEntity> = Vec::new();
        let mut properties: Vec<&'a ApiEntity> = Vec::new();
        let mut methods: Vec<&'a ApiEntity> = Vec::new();

        for member in &entity.members {
            match member.kind {
                EntityKind::Property if member.is_event => events.push(member),
                EntityKind::Property => properties.push(member),
                EntityKind::Constructor => constructors.push(member),
                EntityKind::Method => methods.push(member),
                kind => {
                    return Err(GenerateError::UnexpectedKind {
                        kind,
                        context: format!("members of class {path}"),
                    });
                }
            }
        }

        let translator = DocTranslator::new(self.model, self.diagnostics);
        member_table(
            builder,
            &translator,
            path,
            "Events",
            &["Event", "Modifiers", "Type", "Description"],
            &events,
            TableColumns::with_modifiers_and_type(),
        )?;
        member_table(
            builder,
            &translator,
            path,
            "Constructors",
            &["Constructor", "Modifiers", "Description"],
            &constructors,
            TableColumns::with_modifiers(),
        )?;
        member_table(
            builder,
            &translator,
            path,
            "Properties",
            &["Property", "Modifiers", "Type", "Description"],
            &properties,
            TableColumns::with_modifiers_and_type(),
        )?;
        member_table(
            builder,
            &translator,
            path,
            "Methods",
            &["Method", "Modifiers", "Description"],
            &methods,
            TableColumns::with_modifiers(),
        )?;

        for member in &entity.members {
            scheduled.push((PageUnit::single(member), path.join(member)));
        }
        Ok(())
    }

    /// Interface body: events, properties, and method/construct signature
    /// tables, without the modifiers column.
    fn interface_body(
        &self,
        builder: &mut MarkupBuilder,
        entity: &'a ApiEntity,
        path: &EntityPath,
        scheduled: &mut Vec<(PageUnit<'a>, EntityPath)>,
    ) -> Result<(), GenerateError> {
        let mut events: Vec<&'a ApiEntity> = Vec::new();
        let mut properties: Vec<&'a ApiEntity> = Vec::new();
        let mut methods: Vec<&'a ApiEntity> = Vec::new();

        for member in &entity.members {
            match member.kind {
                EntityKind::PropertySignature if member.is_event => events.push(member),
                EntityKind::PropertySignature => properties.push(member),
                EntityKind::MethodSignature | EntityKind::ConstructSignature => {
                    methods.push(member);
                }
                kind => {
                    return Err(GenerateError::UnexpectedKind {
                        kind,
                        context: format!("members of interface {path}"),
                    });
                }
            }
        }

        let translator = DocTranslator::new(self.model, self.diagnostics);
        member_table(
            builder,
            &translator,
            path,
            "Events",
            &["Event", "Type", "Description"],
            &events,
            TableColumns::with_type(),
        )?;
        member_table(
            builder,
            &translator,
            path,
            "Properties",
            &["Property", "Type", "Description"],
            &properties,
            TableColumns::with_type(),
        )?;
        member_table(
            builder,
            &translator,
            path,
            "Methods",
            &["Method", "Description"],
            &methods,
            TableColumns::plain(),
        )?;

        for member in &entity.members {
            scheduled.push((PageUnit::single(member), path.join(member)));
        }
        Ok(())
    }

    /// Enum body: one members table. Enum members never get their own pages.
    fn enum_body(
        &self,
        builder: &mut MarkupBuilder,
        entity: &ApiEntity,
        path: &EntityPath,
    ) -> Result<(), GenerateError> {
        let translator = DocTranslator::new(self.model, self.diagnostics);
        let mut rows: Vec<Row> = Vec::new();
        for member in &entity.members {
            if member.kind != EntityKind::EnumMember {
                return Err(GenerateError::UnexpectedKind {
                    kind: member.kind,
                    context: format!("members of enum {path}"),
                });
            }
            let initializer = member.initializer.clone().unwrap_or_default();
            rows.push(vec![
                vec![MarkupNode::text_element("span", member.name.clone())],
                vec![MarkupNode::text_element("code", initializer)],
                description_cell(&translator, member, &path.join(member))?,
            ]);
        }
        builder.append(MarkupNode::text_element("h2", "Enumeration Members"));
        emit_table(builder, &["Member", "Value", "Description"], rows)?;
        Ok(())
    }

    /// Callable body: parameters table (only past one parameter), a one-row
    /// returns table when both return type and returns doc exist, and the
    /// throws table, which is emitted even when empty.
    fn callable_body(
        &self,
        builder: &mut MarkupBuilder,
        entity: &ApiEntity,
        path: &EntityPath,
    ) -> Result<(), GenerateError> {
        let translator = DocTranslator::new(self.model, self.diagnostics);

        if let Some(parameters) = &entity.parameters {
            if parameters.len() > 1 {
                builder.append(MarkupNode::text_element("h2", "Parameters"));
                let mut rows: Vec<Row> = Vec::new();
                for parameter in parameters {
                    let description = match parameter.doc.as_deref().and_then(first_paragraph) {
                        Some(nodes) => translator.translate_to_nodes(nodes, path)?,
                        None => Vec::new(),
                    };
                    rows.push(vec![
                        vec![MarkupNode::text_element("span", parameter.name.clone())],
                        vec![MarkupNode::text_element("code", parameter.type_text.clone())],
                        description,
                    ]);
                }
                emit_table(builder, &["Parameter", "Type", "Description"], rows)?;
            }
        }

        if let (Some(return_type), Some(returns)) = (
            &entity.type_text,
            entity.doc.as_ref().and_then(|d| d.returns.as_ref()),
        ) {
            builder.append(MarkupNode::text_element("h2", "Returns"));
            let row = vec![
                vec![MarkupNode::text_element("code", return_type.clone())],
                translator.translate_to_nodes(returns, path)?,
            ];
            emit_table(builder, &["Type", "Description"], vec![row])?;
        }

        builder.append(MarkupNode::text_element("h2", "Throws"));
        let mut rows: Vec<Row> = Vec::new();
        if let Some(doc) = &entity.doc {
            for block in doc.blocks_tagged("@throws") {
                rows.push(vec![translator.translate_to_nodes(&block.content, path)?]);
            }
        }
        emit_table(builder, &["Error"], rows)?;
        Ok(())
    }

}

/// Render one member summary table, skipped entirely when it would hold
/// one row or none.
fn member_table(
    builder: &mut MarkupBuilder,
    translator: &DocTranslator<'_>,
    parent_path: &EntityPath,
    title: &str,
    headers: &[&str],
    members: &[&ApiEntity],
    columns: TableColumns,
) -> Result<(), GenerateError> {
    if members.len() <= 1 {
        return Ok(());
    }
    builder.append(MarkupNode::text_element("h2", title));
    let mut rows: Vec<Row> = Vec::new();
    for &member in members {
        let member_path = parent_path.join(member);
        let mut row: Row = vec![name_link_cell(member, &member_path)];
        if columns.modifiers {
            row.push(if member.is_static {
                vec![MarkupNode::text_element("code", "static")]
            } else {
                Vec::new()
            });
        }
        if columns.type_text {
            row.push(match &member.type_text {
                Some(type_text) => vec![MarkupNode::text_element("code", type_text.clone())],
                None => Vec::new(),
            });
        }
        row.push(description_cell(translator, member, &member_path)?);
        rows.push(row);
    }
    emit_table(builder, headers, rows)?;
    Ok(())
}

/// Translated summary of a member, or an empty cell for doc-less ones.
fn description_cell(
    translator: &DocTranslator<'_>,
    member: &ApiEntity,
    member_path: &EntityPath,
) -> Result<Cell, GenerateError> {
    match &member.doc {
        Some(doc) => translator.translate_to_nodes(&doc.summary, member_path),
        None => Ok(Vec::new()),
    }
}

/// Which optional columns a member table carries.
#[derive(Clone, Copy)]
struct TableColumns {
    modifiers: bool,
    type_text: bool,
}

impl TableColumns {
    fn plain() -> Self {
        Self {
            modifiers: false,
            type_text: false,
        }
    }

    fn with_modifiers() -> Self {
        Self {
            modifiers: true,
            type_text: false,
        }
    }

    fn with_type() -> Self {
        Self {
            modifiers: false,
            type_text: true,
        }
    }

    fn with_modifiers_and_type() -> Self {
        Self {
            modifiers: true,
            type_text: true,
        }
    }
}

/// Heading text for the primary entity of a page unit.
fn heading_text(entity: &ApiEntity, path: &EntityPath) -> Result<String, GenerateError> {
    let label = match entity.kind {
        EntityKind::Model => return Ok("API Reference".to_owned()),
        // Constructors use the scoped name with no kind suffix.
        EntityKind::Constructor | EntityKind::ConstructSignature => {
            return Ok(entity.scoped_name.clone());
        }
        EntityKind::Class => "class",
        EntityKind::Enum => "enum",
        EntityKind::Interface => "interface",
        EntityKind::Method | EntityKind::MethodSignature => "method",
        EntityKind::Function => "function",
        EntityKind::Package => "package",
        EntityKind::Namespace => "namespace",
        EntityKind::Property | EntityKind::PropertySignature => "property",
        EntityKind::TypeAlias => "type",
        EntityKind::Variable => "variable",
        EntityKind::EnumMember | EntityKind::EntryPoint => {
            return Err(GenerateError::UnexpectedKind {
                kind: entity.kind,
                context: format!("page heading for {path}"),
            });
        }
    };
    Ok(format!("{} {label}", entity.scoped_name))
}

/// Context path for one entity of a unit. The absorbed namespace of a
/// merged unit gets its own path (same parent, namespace segment) so its
/// doc references and member pages resolve against the namespace, not the
/// interface.
fn entity_context(entity: &ApiEntity, primary: &ApiEntity, path: &EntityPath) -> EntityPath {
    if std::ptr::eq(entity, primary) {
        path.clone()
    } else {
        path.parent()
            .unwrap_or_else(EntityPath::root)
            .join(entity)
    }
}

fn emit_breadcrumbs(builder: &mut MarkupBuilder, path: &EntityPath) -> Result<(), GenerateError> {
    builder.open_with(
        MarkupNode::element("nav").attr("class", "breadcrumb"),
        |b| {
            for (i, crumb) in routes::breadcrumbs(path).into_iter().enumerate() {
                if i > 0 {
                    b.append(MarkupNode::text_element("span", " > "));
                }
                b.append(MarkupNode::text_element("a", crumb.title).attr("href", crumb.href));
            }
            Ok(())
        },
    )
}

fn emit_stability_banner(builder: &mut MarkupBuilder) -> Result<(), GenerateError> {
    builder.open_with(
        MarkupNode::element("div").attr("class", "stability-warning"),
        |b| {
            b.append(MarkupNode::text_element(
                "p",
                "This API is provided as a preview for developers and may change based \
                 on feedback. Do not use this API in a production environment.",
            ));
            Ok(())
        },
    )
}

/// Signature section: one heading, then one preformatted block per entity
/// with a non-empty rendered declaration.
fn emit_signatures(builder: &mut MarkupBuilder, unit: &PageUnit<'_>) {
    let declared: Vec<&&ApiEntity> = unit
        .entities
        .iter()
        .filter(|e| !e.declaration.is_empty())
        .collect();
    if declared.is_empty() {
        return;
    }
    builder.append(MarkupNode::text_element("h2", "Signature"));
    for entity in declared {
        builder.append(
            MarkupNode::text_element("pre", entity.declaration.clone()).attr("class", "signature"),
        );
    }
}

/// Name cell linking to the member's page.
fn name_link_cell(member: &ApiEntity, member_path: &EntityPath) -> Cell {
    vec![
        MarkupNode::text_element("a", member.name.clone())
            .attr("href", routes::link_for(member_path)),
    ]
}

/// Emit a table with a header row and the given body rows. An empty body
/// is legal; the table then renders with an empty tbody.
fn emit_table(
    builder: &mut MarkupBuilder,
    headers: &[&str],
    rows: Vec<Row>,
) -> Result<(), GenerateError> {
    builder.open(MarkupNode::element("table"));
    builder.open(MarkupNode::element("thead"));
    builder.open(MarkupNode::element("tr"));
    for header in headers {
        builder.append(MarkupNode::text_element("th", *header));
    }
    builder.close("tr")?;
    builder.close("thead")?;
    builder.open(MarkupNode::element("tbody"));
    for row in rows {
        builder.open(MarkupNode::element("tr"));
        for cell in row {
            builder.open(MarkupNode::element("td"));
            for node in cell {
                builder.append(node);
            }
            builder.close("td")?;
        }
        builder.close("tr")?;
    }
    builder.close("tbody")?;
    builder.close("table")?;
    Ok(())
}

/// Direct members of a container, with entry-point grouping levels
/// flattened: package members are listed through their entry points, and
/// the entry-point segment stays in the hierarchy path (filename
/// derivation skips it).
fn listed_members<'m>(
    entity: &'m ApiEntity,
    path: &EntityPath,
) -> Vec<(&'m ApiEntity, EntityPath)> {
    let mut members = Vec::new();
    for member in &entity.members {
        if member.kind == EntityKind::EntryPoint {
            let entry_path = path.join(member);
            for nested in &member.members {
                members.push((nested, entry_path.join(nested)));
            }
        } else {
            members.push((member, path.join(member)));
        }
    }
    members
}

/// Group listed members into page units. A sibling set that is exactly one
/// interface plus one namespace sharing a name merges onto the interface's
/// page; the namespace never gets an independent page.
fn merge_units<'m>(
    members: &[(&'m ApiEntity, EntityPath)],
) -> Vec<(PageUnit<'m>, EntityPath)> {
    let mut units = Vec::new();
    for (member, member_path) in members {
        let member: &'m ApiEntity = *member;
        let same_named: Vec<&'m ApiEntity> = members
            .iter()
            .map(|(other, _)| *other)
            .filter(|other| other.name == member.name)
            .collect();
        let merge_pair = same_named.len() == 2
            && same_named.iter().any(|e| e.kind == EntityKind::Interface)
            && same_named.iter().any(|e| e.kind == EntityKind::Namespace);

        match member.kind {
            EntityKind::Namespace if merge_pair => {
                // Absorbed into the same-named interface's page.
            }
            EntityKind::Interface if merge_pair => {
                let namespace = same_named
                    .iter()
                    .copied()
                    .find(|e| e.kind == EntityKind::Namespace)
                    .expect("merge pair contains a namespace");
                units.push((PageUnit::merged(member, namespace), member_path.clone()));
            }
            _ => units.push((PageUnit::single(member), member_path.clone())),
        }
    }
    units
}

/// First paragraph of a doc block, used for parameter descriptions.
fn first_paragraph(nodes: &[DocNode]) -> Option<&[DocNode]> {
    nodes.iter().find_map(|node| match node {
        DocNode::Paragraph(children) => Some(children.as_slice()),
        _ => None,
    })
}
