//! `NodeKind`: the tagged-variant families of the syntax tree.
//!
//! Every variant stores its own primary tokens directly (`Option<Token>`
//! where the grammar allows the token to be missing after error
//! recovery) and its children as [`NodeId`]s. Trivia and invalid-token
//! slots are *not* part of `NodeKind` — every [`crate::NodeData`] carries
//! those uniformly regardless of kind.

use crate::list::ListKind;
use crate::tree::NodeId;
use gdscript_token::Token;

/// The kind and grammatical payload of one syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // =================================================================
    // Declarations
    // =================================================================
    /// The root class declaration: a whole file parses to one of these.
    ClassDecl {
        class_name_kw: Option<Token>,
        class_name: Option<Token>,
        extends_kw: Option<Token>,
        extends_name: Option<Token>,
        /// `ListKind::ClassBody`
        members: NodeId,
    },
    /// `func name(params) -> ReturnType: body`
    MethodDecl {
        static_kw: Option<Token>,
        func_kw: Token,
        name: Option<Token>,
        /// `ListKind::Parameters`
        params: NodeId,
        arrow: Option<Token>,
        return_type: Option<NodeId>,
        colon: Option<Token>,
        body: NodeId,
    },
    /// `var name: Type = initializer`
    VariableDecl {
        /// `ListKind::Annotations` preceding this declaration, if any.
        annotations: Option<NodeId>,
        static_kw: Option<Token>,
        var_kw: Token,
        name: Option<Token>,
        colon: Option<Token>,
        type_node: Option<NodeId>,
        equal: Option<Token>,
        initializer: Option<NodeId>,
    },
    /// `const NAME: Type = initializer`
    ConstantDecl {
        const_kw: Token,
        name: Option<Token>,
        colon: Option<Token>,
        type_node: Option<NodeId>,
        equal: Option<Token>,
        initializer: Option<NodeId>,
    },
    /// `signal name(params)`
    SignalDecl { signal_kw: Token, name: Option<Token>, params: Option<NodeId> },
    /// `enum Name { values }`
    EnumDecl { enum_kw: Token, name: Option<Token>, lbrace: Option<Token>, values: NodeId, rbrace: Option<Token> },
    /// A single `NAME = value` entry inside an enum.
    EnumValueDecl { name: Option<Token>, equal: Option<Token>, initializer: Option<NodeId> },
    /// `class Name: extends Base: members`
    InnerClassDecl {
        class_kw: Token,
        name: Option<Token>,
        extends_kw: Option<Token>,
        extends_name: Option<Token>,
        colon: Option<Token>,
        members: NodeId,
    },
    /// One parameter in a parameter list.
    ParameterDecl { name: Option<Token>, colon: Option<Token>, type_node: Option<NodeId>, equal: Option<Token>, default: Option<NodeId> },
    /// `@name(args)` annotation attached to the following declaration
    ///.
    AnnotationDecl { at: Token, name: Option<Token>, args: Option<NodeId> },

    // =================================================================
    // Statements
    // =================================================================
    /// An expression used as a statement.
    ExpressionStmt { expr: NodeId },
    /// `return value`
    ReturnStmt { return_kw: Token, value: Option<NodeId> },
    /// `pass`
    PassStmt { pass_kw: Token },
    /// `break`
    BreakStmt { break_kw: Token },
    /// `continue`
    ContinueStmt { continue_kw: Token },
    /// `if cond: body elif... else...`
    IfStmt {
        if_kw: Token,
        cond: NodeId,
        colon: Option<Token>,
        body: NodeId,
        /// `ListKind::ElifClauses`
        elifs: Option<NodeId>,
        else_clause: Option<NodeId>,
    },
    /// `elif cond: body`
    ElifClause { elif_kw: Token, cond: NodeId, colon: Option<Token>, body: NodeId },
    /// `else: body`
    ElseClause { else_kw: Token, colon: Option<Token>, body: NodeId },
    /// `while cond: body`
    WhileStmt { while_kw: Token, cond: NodeId, colon: Option<Token>, body: NodeId },
    /// `for name in iterable: body`
    ForStmt {
        for_kw: Token,
        var_name: Option<Token>,
        colon_type: Option<Token>,
        type_node: Option<NodeId>,
        in_kw: Option<Token>,
        iterable: NodeId,
        colon: Option<Token>,
        body: NodeId,
    },
    /// `match subject: cases`
    MatchStmt { match_kw: Token, subject: NodeId, colon: Option<Token>, /* ListKind::MatchCases */ cases: NodeId },
    /// One `pattern(s): body` arm of a `match`.
    MatchCase { /* ListKind::MatchPatterns */ patterns: NodeId, guard: Option<NodeId>, colon: Option<Token>, body: NodeId },
    /// A local `var`/`const` declaration used as a statement.
    VariableDeclStmt { inner: NodeId },
    /// `yield(object, signal)` used as a statement.
    YieldStmt { yield_kw: Token, args: Option<NodeId> },
    /// `await expr` used as a statement.
    AwaitStmt { await_kw: Token, expr: NodeId },
    /// `assert(cond, message)`
    AssertStmt { assert_kw: Token, cond: NodeId, comma: Option<Token>, message: Option<NodeId> },

    // =================================================================
    // Expressions
    // =================================================================
    /// Integer literal.
    IntLiteral(Token),
    /// Float literal.
    FloatLiteral(Token),
    /// String literal (including triple-quoted).
    StringLiteral(Token),
    /// `true` / `false`.
    BoolLiteral(Token),
    /// `null`.
    NullLiteral(Token),
    /// A bareword identifier used as an expression.
    IdentifierExpr(Token),
    /// `callee(args)`
    CallExpr { callee: NodeId, lparen: Option<Token>, /* ListKind::Arguments */ args: NodeId, rparen: Option<Token> },
    /// `receiver.member`
    MemberAccessExpr { receiver: NodeId, dot: Token, member: Option<Token> },
    /// `receiver[index]`
    IndexerExpr { receiver: NodeId, lbracket: Token, index: NodeId, rbracket: Option<Token> },
    /// Prefix unary operator expression (`-x`, `not x`, `~x`).
    UnaryOpExpr { op: Token, operand: NodeId },
    /// Binary operator expression.
    BinaryOpExpr { left: NodeId, op: Token, right: NodeId },
    /// `true_expr if cond else false_expr`
    TernaryExpr { true_expr: NodeId, if_kw: Token, cond: NodeId, else_kw: Option<Token>, false_expr: Option<NodeId> },
    /// `[elements]`
    ArrayInitExpr { lbracket: Token, /* ListKind::ArrayElements */ elements: NodeId, rbracket: Option<Token> },
    /// `{entries}`
    DictInitExpr { lbrace: Token, /* ListKind::DictEntries */ entries: NodeId, rbrace: Option<Token> },
    /// `key: value` or `key = value` inside a dictionary literal.
    DictEntry { key: NodeId, separator: Option<Token>, value: NodeId },
    /// `$Path/To/Node`
    GetNodeExpr { dollar: Token, path: Option<Token> },
    /// `%UniqueName`
    UniqueNodeExpr { percent: Token, path: Option<Token> },
    /// `^"Path/To/Node"` node-path literal.
    NodePathExpr { literal: Token },
    /// `func(params) -> ReturnType: body` used as an expression.
    LambdaExpr {
        func_kw: Token,
        name: Option<Token>,
        /* ListKind::Parameters */ params: NodeId,
        arrow: Option<Token>,
        return_type: Option<NodeId>,
        colon: Option<Token>,
        body: NodeId,
    },
    /// `await expr` used as an expression.
    AwaitExpr { await_kw: Token, expr: NodeId },
    /// `yield(object, signal)` used as an expression.
    YieldExpr { yield_kw: Token, args: Option<NodeId> },
    /// `(inner)`
    BracketedExpr { lparen: Token, inner: NodeId, rparen: Option<Token> },
    /// `super` / `super.method(...)` receiver expression.
    SuperExpr(Token),
    /// `self`.
    SelfExpr(Token),

    // =================================================================
    // Type nodes
    // =================================================================
    /// A single named type, e.g. `int`, `Node`, `MyClass`.
    SingleTypeNode(Token),
    /// `Array[Element]`
    ArrayOfTypeNode { base: Token, lbracket: Token, element: NodeId, rbracket: Option<Token> },
    /// `Dictionary[Key, Value]`
    DictionaryOfTypeNode { base: Token, lbracket: Token, key: NodeId, comma: Option<Token>, value: NodeId, rbracket: Option<Token> },

    // =================================================================
    // Structural
    // =================================================================
    /// A first-class list of items with interleaved separator tokens
    ///.
    List { kind: ListKind, items: Vec<NodeId>, separators: Vec<Token> },
    /// Recovery placeholder for a slot the reader could not produce a
    /// real node for; the slot's invalid tokens still carry the source
    /// text.
    Error,
}

impl NodeKind {
    /// Primary (non-trivia, non-invalid) tokens owned directly by this
    /// node, in grammatical order. Does not recurse into children.
    pub fn own_tokens(&self) -> Vec<Token> {
        use NodeKind::*;
        let mut out = Vec::new();
        let mut push = |t: &Option<Token>| {
            if let Some(tok) = t {
                out.push(tok.clone());
            }
        };
        match self {
            ClassDecl { class_name_kw, class_name, extends_kw, extends_name, .. } => {
                push(class_name_kw);
                push(class_name);
                push(extends_kw);
                push(extends_name);
            }
            MethodDecl { static_kw, func_kw, name, arrow, colon, .. } => {
                push(static_kw);
                out.push(func_kw.clone());
                push(name);
                push(arrow);
                push(colon);
            }
            VariableDecl { static_kw, var_kw, name, colon, equal, .. } => {
                push(static_kw);
                out.push(var_kw.clone());
                push(name);
                push(colon);
                push(equal);
            }
            ConstantDecl { const_kw, name, colon, equal, .. } => {
                out.push(const_kw.clone());
                push(name);
                push(colon);
                push(equal);
            }
            SignalDecl { signal_kw, name, .. } => {
                out.push(signal_kw.clone());
                push(name);
            }
            EnumDecl { enum_kw, name, lbrace, rbrace, .. } => {
                out.push(enum_kw.clone());
                push(name);
                push(lbrace);
                push(rbrace);
            }
            EnumValueDecl { name, equal, .. } => {
                push(name);
                push(equal);
            }
            InnerClassDecl { class_kw, name, extends_kw, extends_name, colon, .. } => {
                out.push(class_kw.clone());
                push(name);
                push(extends_kw);
                push(extends_name);
                push(colon);
            }
            ParameterDecl { name, colon, equal, .. } => {
                push(name);
                push(colon);
                push(equal);
            }
            AnnotationDecl { at, name, .. } => {
                out.push(at.clone());
                push(name);
            }
            ExpressionStmt { .. } => {}
            ReturnStmt { return_kw, .. } => out.push(return_kw.clone()),
            PassStmt { pass_kw } => out.push(pass_kw.clone()),
            BreakStmt { break_kw } => out.push(break_kw.clone()),
            ContinueStmt { continue_kw } => out.push(continue_kw.clone()),
            IfStmt { if_kw, colon, .. } => {
                out.push(if_kw.clone());
                push(colon);
            }
            ElifClause { elif_kw, colon, .. } => {
                out.push(elif_kw.clone());
                push(colon);
            }
            ElseClause { else_kw, colon, .. } => {
                out.push(else_kw.clone());
                push(colon);
            }
            WhileStmt { while_kw, colon, .. } => {
                out.push(while_kw.clone());
                push(colon);
            }
            ForStmt { for_kw, var_name, colon_type, in_kw, colon, .. } => {
                out.push(for_kw.clone());
                push(var_name);
                push(colon_type);
                push(in_kw);
                push(colon);
            }
            MatchStmt { match_kw, colon, .. } => {
                out.push(match_kw.clone());
                push(colon);
            }
            MatchCase { colon, .. } => push(colon),
            VariableDeclStmt { .. } => {}
            YieldStmt { yield_kw, .. } => out.push(yield_kw.clone()),
            AwaitStmt { await_kw, .. } => out.push(await_kw.clone()),
            AssertStmt { assert_kw, comma, .. } => {
                out.push(assert_kw.clone());
                push(comma);
            }
            IntLiteral(t) | FloatLiteral(t) | StringLiteral(t) | BoolLiteral(t) | NullLiteral(t) => {
                out.push(t.clone());
            }
            IdentifierExpr(t) => out.push(t.clone()),
            CallExpr { lparen, rparen, .. } => {
                push(lparen);
                push(rparen);
            }
            MemberAccessExpr { dot, member, .. } => {
                out.push(dot.clone());
                push(member);
            }
            IndexerExpr { lbracket, rbracket, .. } => {
                out.push(lbracket.clone());
                push(rbracket);
            }
            UnaryOpExpr { op, .. } => out.push(op.clone()),
            BinaryOpExpr { op, .. } => out.push(op.clone()),
            TernaryExpr { if_kw, else_kw, .. } => {
                out.push(if_kw.clone());
                push(else_kw);
            }
            ArrayInitExpr { lbracket, rbracket, .. } => {
                out.push(lbracket.clone());
                push(rbracket);
            }
            DictInitExpr { lbrace, rbrace, .. } => {
                out.push(lbrace.clone());
                push(rbrace);
            }
            DictEntry { separator, .. } => push(separator),
            GetNodeExpr { dollar, path } => {
                out.push(dollar.clone());
                push(path);
            }
            UniqueNodeExpr { percent, path } => {
                out.push(percent.clone());
                push(path);
            }
            NodePathExpr { literal } => out.push(literal.clone()),
            LambdaExpr { func_kw, name, arrow, colon, .. } => {
                out.push(func_kw.clone());
                push(name);
                push(arrow);
                push(colon);
            }
            AwaitExpr { await_kw, .. } => out.push(await_kw.clone()),
            YieldExpr { yield_kw, .. } => out.push(yield_kw.clone()),
            BracketedExpr { lparen, rparen, .. } => {
                out.push(lparen.clone());
                push(rparen);
            }
            SuperExpr(t) | SelfExpr(t) => out.push(t.clone()),
            SingleTypeNode(t) => out.push(t.clone()),
            ArrayOfTypeNode { base, lbracket, rbracket, .. } => {
                out.push(base.clone());
                out.push(lbracket.clone());
                push(rbracket);
            }
            DictionaryOfTypeNode { base, lbracket, comma, rbracket, .. } => {
                out.push(base.clone());
                out.push(lbracket.clone());
                push(comma);
                push(rbracket);
            }
            List { separators, .. } => out.extend(separators.iter().cloned()),
            Error => {}
        }
        out
    }

    /// Direct child node slots, in grammatical order. Does not recurse.
    pub fn child_ids(&self) -> Vec<NodeId> {
        use NodeKind::*;
        let mut out = Vec::new();
        let mut push_opt = |id: &Option<NodeId>| {
            if let Some(id) = id {
                out.push(*id);
            }
        };
        match self {
            ClassDecl { members, .. } => out.push(*members),
            MethodDecl { params, return_type, body, .. } => {
                out.push(*params);
                push_opt(return_type);
                out.push(*body);
            }
            VariableDecl { annotations, type_node, initializer, .. } => {
                push_opt(annotations);
                push_opt(type_node);
                push_opt(initializer);
            }
            ConstantDecl { type_node, initializer, .. } => {
                push_opt(type_node);
                push_opt(initializer);
            }
            SignalDecl { params, .. } => push_opt(params),
            EnumDecl { values, .. } => out.push(*values),
            EnumValueDecl { initializer, .. } => push_opt(initializer),
            InnerClassDecl { members, .. } => out.push(*members),
            ParameterDecl { type_node, default, .. } => {
                push_opt(type_node);
                push_opt(default);
            }
            AnnotationDecl { args, .. } => push_opt(args),
            ExpressionStmt { expr } => out.push(*expr),
            ReturnStmt { value, .. } => push_opt(value),
            PassStmt { .. } | BreakStmt { .. } | ContinueStmt { .. } => {}
            IfStmt { cond, body, elifs, else_clause, .. } => {
                out.push(*cond);
                out.push(*body);
                push_opt(elifs);
                push_opt(else_clause);
            }
            ElifClause { cond, body, .. } => {
                out.push(*cond);
                out.push(*body);
            }
            ElseClause { body, .. } => out.push(*body),
            WhileStmt { cond, body, .. } => {
                out.push(*cond);
                out.push(*body);
            }
            ForStmt { type_node, iterable, body, .. } => {
                push_opt(type_node);
                out.push(*iterable);
                out.push(*body);
            }
            MatchStmt { subject, cases, .. } => {
                out.push(*subject);
                out.push(*cases);
            }
            MatchCase { patterns, guard, body, .. } => {
                out.push(*patterns);
                push_opt(guard);
                out.push(*body);
            }
            VariableDeclStmt { inner } => out.push(*inner),
            YieldStmt { args, .. } => push_opt(args),
            AwaitStmt { expr, .. } => out.push(*expr),
            AssertStmt { cond, message, .. } => {
                out.push(*cond);
                push_opt(message);
            }
            IntLiteral(_) | FloatLiteral(_) | StringLiteral(_) | BoolLiteral(_) | NullLiteral(_) => {}
            IdentifierExpr(_) => {}
            CallExpr { callee, args, .. } => {
                out.push(*callee);
                out.push(*args);
            }
            MemberAccessExpr { receiver, .. } => out.push(*receiver),
            IndexerExpr { receiver, index, .. } => {
                out.push(*receiver);
                out.push(*index);
            }
            UnaryOpExpr { operand, .. } => out.push(*operand),
            BinaryOpExpr { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            TernaryExpr { true_expr, cond, false_expr, .. } => {
                out.push(*true_expr);
                out.push(*cond);
                push_opt(false_expr);
            }
            ArrayInitExpr { elements, .. } => out.push(*elements),
            DictInitExpr { entries, .. } => out.push(*entries),
            DictEntry { key, value, .. } => {
                out.push(*key);
                out.push(*value);
            }
            GetNodeExpr { .. } | UniqueNodeExpr { .. } | NodePathExpr { .. } => {}
            LambdaExpr { params, return_type, body, .. } => {
                out.push(*params);
                push_opt(return_type);
                out.push(*body);
            }
            AwaitExpr { expr, .. } => out.push(*expr),
            YieldExpr { args, .. } => push_opt(args),
            BracketedExpr { inner, .. } => out.push(*inner),
            SuperExpr(_) | SelfExpr(_) => {}
            SingleTypeNode(_) => {}
            ArrayOfTypeNode { element, .. } => out.push(*element),
            DictionaryOfTypeNode { key, value, .. } => {
                out.push(*key);
                out.push(*value);
            }
            List { items, .. } => out.extend(items.iter().copied()),
            Error => {}
        }
        out
    }

    /// Human-readable name of this variant, used in diagnostics and tests.
    pub fn variant_name(&self) -> &'static str {
        use NodeKind::*;
        match self {
            ClassDecl { .. } => "ClassDecl",
            MethodDecl { .. } => "MethodDecl",
            VariableDecl { .. } => "VariableDecl",
            ConstantDecl { .. } => "ConstantDecl",
            SignalDecl { .. } => "SignalDecl",
            EnumDecl { .. } => "EnumDecl",
            EnumValueDecl { .. } => "EnumValueDecl",
            InnerClassDecl { .. } => "InnerClassDecl",
            ParameterDecl { .. } => "ParameterDecl",
            AnnotationDecl { .. } => "AnnotationDecl",
            ExpressionStmt { .. } => "ExpressionStmt",
            ReturnStmt { .. } => "ReturnStmt",
            PassStmt { .. } => "PassStmt",
            BreakStmt { .. } => "BreakStmt",
            ContinueStmt { .. } => "ContinueStmt",
            IfStmt { .. } => "IfStmt",
            ElifClause { .. } => "ElifClause",
            ElseClause { .. } => "ElseClause",
            WhileStmt { .. } => "WhileStmt",
            ForStmt { .. } => "ForStmt",
            MatchStmt { .. } => "MatchStmt",
            MatchCase { .. } => "MatchCase",
            VariableDeclStmt { .. } => "VariableDeclStmt",
            YieldStmt { .. } => "YieldStmt",
            AwaitStmt { .. } => "AwaitStmt",
            AssertStmt { .. } => "AssertStmt",
            IntLiteral(_) => "IntLiteral",
            FloatLiteral(_) => "FloatLiteral",
            StringLiteral(_) => "StringLiteral",
            BoolLiteral(_) => "BoolLiteral",
            NullLiteral(_) => "NullLiteral",
            IdentifierExpr(_) => "IdentifierExpr",
            CallExpr { .. } => "CallExpr",
            MemberAccessExpr { .. } => "MemberAccessExpr",
            IndexerExpr { .. } => "IndexerExpr",
            UnaryOpExpr { .. } => "UnaryOpExpr",
            BinaryOpExpr { .. } => "BinaryOpExpr",
            TernaryExpr { .. } => "TernaryExpr",
            ArrayInitExpr { .. } => "ArrayInitExpr",
            DictInitExpr { .. } => "DictInitExpr",
            DictEntry { .. } => "DictEntry",
            GetNodeExpr { .. } => "GetNodeExpr",
            UniqueNodeExpr { .. } => "UniqueNodeExpr",
            NodePathExpr { .. } => "NodePathExpr",
            LambdaExpr { .. } => "LambdaExpr",
            AwaitExpr { .. } => "AwaitExpr",
            YieldExpr { .. } => "YieldExpr",
            BracketedExpr { .. } => "BracketedExpr",
            SuperExpr(_) => "SuperExpr",
            SelfExpr(_) => "SelfExpr",
            SingleTypeNode(_) => "SingleTypeNode",
            ArrayOfTypeNode { .. } => "ArrayOfTypeNode",
            DictionaryOfTypeNode { .. } => "DictionaryOfTypeNode",
            List { .. } => "List",
            Error => "Error",
        }
    }
}
