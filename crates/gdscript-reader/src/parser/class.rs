//! Class body resolver: `class_name`, `extends`, `var`, `const`,
//! `func`, `signal`, `enum`, inner `class`, and the annotations that
//! precede any of them.

use super::Parser;
use gdscript_ast::{ListKind, NodeId, NodeKind};
use gdscript_token::TokenKind;

impl<'a> Parser<'a> {
    /// Parses the whole file into the tree's root `ClassDecl`, in
    /// place. `class_name`/`extends` lines can appear anywhere among
    /// the top-level members (conventionally first); this pass collects
    /// whichever it sees first of each into the root's own fields
    /// rather than the `members` list, and everything else becomes a
    /// member.
    pub(crate) fn parse_class_into_root(&mut self) {
        let mut class_name_kw = None;
        let mut class_name = None;
        let mut extends_kw = None;
        let mut extends_name = None;
        let mut members = Vec::new();
        let mut header_trivia = Vec::new();
        let mut header_invalid = Vec::new();

        loop {
            if self.ctx.is_eof() {
                break;
            }
            match self.ctx.current_kind() {
                TokenKind::ClassName if class_name_kw.is_none() => {
                    class_name_kw = Some(self.take_token(&mut header_trivia, &mut header_invalid));
                    class_name =
                        self.eat_token(TokenKind::Identifier, &mut header_trivia, &mut header_invalid);
                }
                TokenKind::Extends if extends_kw.is_none() => {
                    extends_kw = Some(self.take_token(&mut header_trivia, &mut header_invalid));
                    extends_name =
                        self.eat_token(TokenKind::Identifier, &mut header_trivia, &mut header_invalid);
                }
                _ => {
                    let before = self.ctx.current().span.start;
                    members.push(self.parse_class_member());
                    if let Some(extra) = self.guard_progress(before, "class member") {
                        members.push(extra);
                    }
                }
            }
        }

        let members_list = self.finish_list(ListKind::ClassBody, members, Vec::new());
        let root = self.tree.root();
        *self.tree.get_mut(root) = gdscript_ast::NodeData::new(NodeKind::ClassDecl {
            class_name_kw,
            class_name,
            extends_kw,
            extends_name,
            members: members_list,
        });
        self.tree.set_parent(members_list, root);
        // The reassignment above rebuilds the root's NodeData from
        // scratch, so the class_name/extends header's inter-token trivia
        // (and any invalid runs) can only be attached here, afterward.
        for t in header_trivia {
            self.tree.attach_trivia(root, t);
        }
        for t in header_invalid {
            self.tree.attach_invalid(root, t);
        }
    }

    /// Dispatches one class-level member, collecting any annotations
    /// that precede it first.
    fn parse_class_member(&mut self) -> NodeId {
        if self.ctx.at(TokenKind::At) {
            return self.parse_one_annotation();
        }
        if self.ctx.at(TokenKind::Static) {
            return self.parse_static_prefixed();
        }
        match self.ctx.current_kind() {
            TokenKind::Var => self.parse_variable_decl(None),
            TokenKind::Const => self.parse_constant_decl(),
            TokenKind::Func => self.parse_method_decl(None, None),
            TokenKind::Signal => self.parse_signal_decl(),
            TokenKind::Enum => self.parse_enum_decl(),
            TokenKind::Class => self.parse_inner_class_decl(),
            _ => self.recover_into_error(TokenKind::Newline),
        }
    }

    /// `@annotation(args)` as one member of the class body.
    /// `AttributesDeclaredBefore` (§4.C) walks the parent `ClassBody`
    /// list backwards from a decorated member to collect the
    /// annotations preceding it, so a run of several annotations is
    /// just several sibling `AnnotationDecl` members — no explicit link
    /// from the decorated member back to them is needed here.
    fn parse_one_annotation(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let at = self.take_token(&mut trivia, &mut invalid);
        let name = self.ctx.at(TokenKind::Identifier).then(|| {
            let tok = self.take_token(&mut trivia, &mut invalid);
            crate::lexer::reclassify_as_annotation_name(&tok)
        });
        let args = if self.ctx.at(TokenKind::LeftParen) {
            let _ = self.eat_token(TokenKind::LeftParen, &mut trivia, &mut invalid);
            let list = self.parse_argument_list();
            let _ = self.eat_token(TokenKind::RightParen, &mut trivia, &mut invalid);
            Some(list)
        } else {
            None
        };
        let children: Vec<NodeId> = args.into_iter().collect();
        self.finish_node(NodeKind::AnnotationDecl { at, name, args }, trivia, invalid, &children)
    }

    /// `static` only legally precedes `func` or `var` (§4.B edge case);
    /// anything else recovers the bare `static` token as a single
    /// invalid-token node and lets the class-body loop retry the
    /// following token fresh.
    fn parse_static_prefixed(&mut self) -> NodeId {
        match self.ctx.peek_next_significant_kind() {
            TokenKind::Func => {
                let mut trivia = Vec::new();
                let mut invalid = Vec::new();
                let static_kw = Some(self.take_token(&mut trivia, &mut invalid));
                self.parse_method_decl(None, static_kw)
            }
            TokenKind::Var => {
                let mut trivia = Vec::new();
                let mut invalid = Vec::new();
                let static_kw = Some(self.take_token(&mut trivia, &mut invalid));
                self.parse_variable_decl_with_static(None, static_kw)
            }
            _ => {
                let mut trivia = Vec::new();
                let mut invalid = Vec::new();
                let static_kw = self.take_token(&mut trivia, &mut invalid);
                invalid.push(static_kw);
                self.finish_node(NodeKind::Error, trivia, invalid, &[])
            }
        }
    }

    pub(crate) fn parse_variable_decl(&mut self, annotations: Option<NodeId>) -> NodeId {
        self.parse_variable_decl_with_static(annotations, None)
    }

    fn parse_variable_decl_with_static(
        &mut self,
        annotations: Option<NodeId>,
        static_kw: Option<gdscript_token::Token>,
    ) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let var_kw = self.take_token(&mut trivia, &mut invalid);
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let type_node = if colon.is_some() && !self.ctx.at(TokenKind::Equal) { Some(self.parse_type_node()) } else { None };
        let equal = self.eat_token(TokenKind::Equal, &mut trivia, &mut invalid);
        let initializer = if equal.is_some() { Some(self.parse_expr()) } else { None };
        let mut children = Vec::new();
        if let Some(id) = annotations {
            children.push(id);
        }
        if let Some(id) = type_node {
            children.push(id);
        }
        if let Some(id) = initializer {
            children.push(id);
        }
        self.finish_node(
            NodeKind::VariableDecl { annotations, static_kw, var_kw, name, colon, type_node, equal, initializer },
            trivia,
            invalid,
            &children,
        )
    }

    pub(crate) fn parse_constant_decl(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let const_kw = self.take_token(&mut trivia, &mut invalid);
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let type_node = if colon.is_some() && !self.ctx.at(TokenKind::Equal) { Some(self.parse_type_node()) } else { None };
        let equal = self.eat_token(TokenKind::Equal, &mut trivia, &mut invalid);
        let initializer = if equal.is_some() { Some(self.parse_expr()) } else { None };
        let mut children = Vec::new();
        if let Some(id) = type_node {
            children.push(id);
        }
        if let Some(id) = initializer {
            children.push(id);
        }
        self.finish_node(NodeKind::ConstantDecl { const_kw, name, colon, type_node, equal, initializer }, trivia, invalid, &children)
    }

    fn parse_method_decl(&mut self, _annotations: Option<NodeId>, static_kw: Option<gdscript_token::Token>) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let indent = self.ctx.pending_indent_width().unwrap_or(0);
        let func_kw = self.take_token(&mut trivia, &mut invalid);
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let params = self.parse_parameter_list();
        let arrow = self.eat_token(TokenKind::Arrow, &mut trivia, &mut invalid);
        let return_type = if arrow.is_some() { Some(self.parse_type_node()) } else { None };
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let body = self.parse_suite(indent);
        let mut children = vec![params];
        if let Some(id) = return_type {
            children.push(id);
        }
        children.push(body);
        self.finish_node(
            NodeKind::MethodDecl { static_kw, func_kw, name, params, arrow, return_type, colon, body },
            trivia,
            invalid,
            &children,
        )
    }

    fn parse_signal_decl(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let signal_kw = self.take_token(&mut trivia, &mut invalid);
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let params = if self.ctx.at(TokenKind::LeftParen) { Some(self.parse_parameter_list()) } else { None };
        let children: Vec<NodeId> = params.into_iter().collect();
        self.finish_node(NodeKind::SignalDecl { signal_kw, name, params }, trivia, invalid, &children)
    }

    fn parse_enum_decl(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let enum_kw = self.take_token(&mut trivia, &mut invalid);
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let lbrace = self.eat_token(TokenKind::LeftBrace, &mut trivia, &mut invalid);
        let values = self.parse_comma_separated(ListKind::EnumValues, TokenKind::RightBrace, Self::parse_enum_value);
        let rbrace = self.eat_token(TokenKind::RightBrace, &mut trivia, &mut invalid);
        self.finish_node(NodeKind::EnumDecl { enum_kw, name, lbrace, values, rbrace }, trivia, invalid, &[values])
    }

    fn parse_enum_value(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let equal = self.eat_token(TokenKind::Equal, &mut trivia, &mut invalid);
        let initializer = if equal.is_some() { Some(self.parse_expr()) } else { None };
        let children: Vec<NodeId> = initializer.into_iter().collect();
        self.finish_node(NodeKind::EnumValueDecl { name, equal, initializer }, trivia, invalid, &children)
    }

    fn parse_inner_class_decl(&mut self) -> NodeId {
        let mut trivia = Vec::new();
        let mut invalid = Vec::new();
        let indent = self.ctx.pending_indent_width().unwrap_or(0);
        let class_kw = self.take_token(&mut trivia, &mut invalid);
        let name = self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid);
        let extends_kw = self.eat_token(TokenKind::Extends, &mut trivia, &mut invalid);
        let extends_name = if extends_kw.is_some() { self.eat_token(TokenKind::Identifier, &mut trivia, &mut invalid) } else { None };
        let colon = self.eat_token(TokenKind::Colon, &mut trivia, &mut invalid);
        let members = self.parse_inner_class_members(indent);
        self.finish_node(
            NodeKind::InnerClassDecl { class_kw, name, extends_kw, extends_name, colon, members },
            trivia,
            invalid,
            &[members],
        )
    }

    /// Like the suite resolver but for declarations rather than
    /// statements — an inner class's body is itself a `ClassBody` list.
    fn parse_inner_class_members(&mut self, parent_indent: usize) -> NodeId {
        if !self.ctx.pending_has_newline() {
            let mut items = Vec::new();
            if !self.ctx.is_eof() && !self.ctx.at(TokenKind::Newline) {
                items.push(self.parse_class_member());
            }
            return self.finish_list(ListKind::ClassBody, items, Vec::new());
        }
        let body_indent = self.ctx.pending_indent_width().unwrap_or(parent_indent + 1);
        let mut items = Vec::new();
        loop {
            if self.ctx.is_eof() {
                break;
            }
            match self.ctx.pending_indent_width() {
                Some(width) if width >= body_indent => {}
                _ => break,
            }
            let before = self.ctx.current().span.start;
            items.push(self.parse_class_member());
            if let Some(extra) = self.guard_progress(before, "inner class member") {
                items.push(extra);
            }
        }
        self.finish_list(ListKind::ClassBody, items, Vec::new())
    }
}
