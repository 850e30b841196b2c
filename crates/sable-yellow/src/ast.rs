use crate::SyntaxKind::{self, *};
use crate::{SyntaxNode, SyntaxToken};

pub trait AstNode<'a>: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>;

    fn syntax(&self) -> SyntaxNode<'a>;
}

macro_rules! ast_nodes {
    ($($name:ident = $kind:ident;)*) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name<'a>(SyntaxNode<'a>);

            impl<'a> AstNode<'a> for $name<'a> {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == $kind
                }

                fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                    Self::can_cast(syntax.kind()).then_some(Self(syntax))
                }

                fn syntax(&self) -> SyntaxNode<'a> {
                    self.0
                }
            }
        )*
    };
}

macro_rules! ast_enums {
    ($($(#[$attr:meta])* $name:ident { $($variant:ident($node:ident),)* })*) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub enum $name<'a> {
                $($variant($node<'a>),)*
            }

            impl<'a> AstNode<'a> for $name<'a> {
                fn can_cast(kind: SyntaxKind) -> bool {
                    false $(|| $node::can_cast(kind))*
                }

                fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                    $(
                        if let Some(node) = $node::cast(syntax) {
                            return Some(Self::$variant(node));
                        }
                    )*
                    None
                }

                fn syntax(&self) -> SyntaxNode<'a> {
                    match self {
                        $(Self::$variant(node) => node.syntax(),)*
                    }
                }
            }
        )*
    };
}

ast_nodes! {
    CompilationUnit = COMPILATION_UNIT;
    GlobalStatement = GLOBAL_STATEMENT;

    IdentifierName = IDENTIFIER_NAME;
    GenericName = GENERIC_NAME;
    TypeArgumentList = TYPE_ARGUMENT_LIST;
    QualifiedName = QUALIFIED_NAME;
    AliasQualifiedName = ALIAS_QUALIFIED_NAME;
    PredefinedType = PREDEFINED_TYPE;
    ArrayType = ARRAY_TYPE;
    NullableType = NULLABLE_TYPE;
    PointerType = POINTER_TYPE;
    FunctionPointerType = FUNCTION_POINTER_TYPE;
    TupleType = TUPLE_TYPE;
    TupleElement = TUPLE_ELEMENT;
    RefType = REF_TYPE;
    ScopedType = SCOPED_TYPE;
    OmittedTypeArgument = OMITTED_TYPE_ARGUMENT;

    LiteralExpr = LITERAL_EXPR;
    ParenthesizedExpr = PARENTHESIZED_EXPR;
    TupleExpr = TUPLE_EXPR;
    Argument = ARGUMENT;
    ArgumentList = ARGUMENT_LIST;
    BinaryExpr = BINARY_EXPR;
    AssignmentExpr = ASSIGNMENT_EXPR;
    PrefixUnaryExpr = PREFIX_UNARY_EXPR;
    PostfixUnaryExpr = POSTFIX_UNARY_EXPR;
    ConditionalExpr = CONDITIONAL_EXPR;
    CastExpr = CAST_EXPR;
    InvocationExpr = INVOCATION_EXPR;
    ElementAccessExpr = ELEMENT_ACCESS_EXPR;
    MemberAccessExpr = MEMBER_ACCESS_EXPR;
    ConditionalAccessExpr = CONDITIONAL_ACCESS_EXPR;
    MemberBindingExpr = MEMBER_BINDING_EXPR;
    ElementBindingExpr = ELEMENT_BINDING_EXPR;
    ThisExpr = THIS_EXPR;
    BaseExpr = BASE_EXPR;
    TypeofExpr = TYPEOF_EXPR;
    SizeofExpr = SIZEOF_EXPR;
    DefaultExpr = DEFAULT_EXPR;
    CheckedExpr = CHECKED_EXPR;
    RefExpr = REF_EXPR;
    ObjectCreationExpr = OBJECT_CREATION_EXPR;
    ImplicitObjectCreationExpr = IMPLICIT_OBJECT_CREATION_EXPR;
    ArrayCreationExpr = ARRAY_CREATION_EXPR;
    ImplicitArrayCreationExpr = IMPLICIT_ARRAY_CREATION_EXPR;
    StackallocArrayCreationExpr = STACKALLOC_ARRAY_CREATION_EXPR;
    ImplicitStackallocArrayCreationExpr = IMPLICIT_STACKALLOC_ARRAY_CREATION_EXPR;
    InitializerExpr = ARRAY_INITIALIZER_EXPR;
    AnonymousObjectCreationExpr = ANONYMOUS_OBJECT_CREATION_EXPR;
    AnonymousMethodExpr = ANONYMOUS_METHOD_EXPR;
    SimpleLambdaExpr = SIMPLE_LAMBDA_EXPR;
    ParenLambdaExpr = PAREN_LAMBDA_EXPR;
    ParameterList = PARAMETER_LIST;
    Parameter = PARAMETER;
    DeclarationExpr = DECLARATION_EXPR;
    IsPatternExpr = IS_PATTERN_EXPR;
    SwitchExpr = SWITCH_EXPR;
    SwitchExprArm = SWITCH_EXPR_ARM;
    ThrowExpr = THROW_EXPR;
    AwaitExpr = AWAIT_EXPR;
    RangeExpr = RANGE_EXPR;
    WithExpr = WITH_EXPR;
    InterpolatedStringExpr = INTERPOLATED_STRING_EXPR;
    CollectionExpr = COLLECTION_EXPR;
    QueryExpr = QUERY_EXPR;

    SingleVariableDesignation = SINGLE_VARIABLE_DESIGNATION;
    DiscardDesignation = DISCARD_DESIGNATION;
    ParenthesizedVariableDesignation = PARENTHESIZED_VARIABLE_DESIGNATION;

    DiscardPattern = DISCARD_PATTERN;
    DeclarationPattern = DECLARATION_PATTERN;
    VarPattern = VAR_PATTERN;
    ConstantPattern = CONSTANT_PATTERN;
    TypePattern = TYPE_PATTERN;
    RecursivePattern = RECURSIVE_PATTERN;
    ParenthesizedPattern = PARENTHESIZED_PATTERN;
    RelationalPattern = RELATIONAL_PATTERN;
    UnaryPattern = UNARY_PATTERN;
    BinaryPattern = BINARY_PATTERN;
    ListPattern = LIST_PATTERN;
    SlicePattern = SLICE_PATTERN;
    PropertyPatternClause = PROPERTY_PATTERN_CLAUSE;
    Subpattern = SUBPATTERN;

    Block = BLOCK;
    LocalDeclarationStmt = LOCAL_DECLARATION_STMT;
    VariableDeclaration = VARIABLE_DECLARATION;
    VariableDeclarator = VARIABLE_DECLARATOR;
    ExpressionStmt = EXPRESSION_STMT;
    EmptyStmt = EMPTY_STMT;
    LabeledStmt = LABELED_STMT;
    GotoStmt = GOTO_STMT;
    BreakStmt = BREAK_STMT;
    ContinueStmt = CONTINUE_STMT;
    ReturnStmt = RETURN_STMT;
    ThrowStmt = THROW_STMT;
    YieldReturnStmt = YIELD_RETURN_STMT;
    YieldBreakStmt = YIELD_BREAK_STMT;
    WhileStmt = WHILE_STMT;
    DoStmt = DO_STMT;
    ForStmt = FOR_STMT;
    ForEachStmt = FOREACH_STMT;
    ForEachVariableStmt = FOREACH_VARIABLE_STMT;
    UsingStmt = USING_STMT;
    FixedStmt = FIXED_STMT;
    CheckedStmt = CHECKED_STMT;
    UnsafeStmt = UNSAFE_STMT;
    LockStmt = LOCK_STMT;
    IfStmt = IF_STMT;
    SwitchStmt = SWITCH_STMT;
    TryStmt = TRY_STMT;
    LocalFunctionStmt = LOCAL_FUNCTION_STMT;
}

ast_enums! {
    /// Every expression shape, names and types included since they can
    /// appear in expression position.
    Expr {
        IdentifierName(IdentifierName),
        GenericName(GenericName),
        QualifiedName(QualifiedName),
        AliasQualifiedName(AliasQualifiedName),
        PredefinedType(PredefinedType),
        NullableType(NullableType),
        ArrayType(ArrayType),
        PointerType(PointerType),
        RefType(RefType),
        Literal(LiteralExpr),
        Parenthesized(ParenthesizedExpr),
        Tuple(TupleExpr),
        Binary(BinaryExpr),
        Assignment(AssignmentExpr),
        PrefixUnary(PrefixUnaryExpr),
        PostfixUnary(PostfixUnaryExpr),
        Conditional(ConditionalExpr),
        Cast(CastExpr),
        Invocation(InvocationExpr),
        ElementAccess(ElementAccessExpr),
        MemberAccess(MemberAccessExpr),
        ConditionalAccess(ConditionalAccessExpr),
        MemberBinding(MemberBindingExpr),
        ElementBinding(ElementBindingExpr),
        This(ThisExpr),
        Base(BaseExpr),
        Typeof(TypeofExpr),
        Sizeof(SizeofExpr),
        Default(DefaultExpr),
        Checked(CheckedExpr),
        Ref(RefExpr),
        ObjectCreation(ObjectCreationExpr),
        ImplicitObjectCreation(ImplicitObjectCreationExpr),
        ArrayCreation(ArrayCreationExpr),
        ImplicitArrayCreation(ImplicitArrayCreationExpr),
        StackallocArrayCreation(StackallocArrayCreationExpr),
        ImplicitStackallocArrayCreation(ImplicitStackallocArrayCreationExpr),
        Initializer(InitializerExpr),
        AnonymousObjectCreation(AnonymousObjectCreationExpr),
        AnonymousMethod(AnonymousMethodExpr),
        SimpleLambda(SimpleLambdaExpr),
        ParenLambda(ParenLambdaExpr),
        Declaration(DeclarationExpr),
        IsPattern(IsPatternExpr),
        Switch(SwitchExpr),
        Throw(ThrowExpr),
        Await(AwaitExpr),
        Range(RangeExpr),
        With(WithExpr),
        InterpolatedString(InterpolatedStringExpr),
        Collection(CollectionExpr),
        Query(QueryExpr),
    }

    Type {
        IdentifierName(IdentifierName),
        GenericName(GenericName),
        QualifiedName(QualifiedName),
        AliasQualifiedName(AliasQualifiedName),
        Predefined(PredefinedType),
        Array(ArrayType),
        Nullable(NullableType),
        Pointer(PointerType),
        FunctionPointer(FunctionPointerType),
        Tuple(TupleType),
        Ref(RefType),
        Scoped(ScopedType),
        Omitted(OmittedTypeArgument),
    }

    Pattern {
        Discard(DiscardPattern),
        Declaration(DeclarationPattern),
        Var(VarPattern),
        Constant(ConstantPattern),
        Type(TypePattern),
        Recursive(RecursivePattern),
        Parenthesized(ParenthesizedPattern),
        Relational(RelationalPattern),
        Unary(UnaryPattern),
        Binary(BinaryPattern),
        List(ListPattern),
        Slice(SlicePattern),
    }

    VariableDesignation {
        Single(SingleVariableDesignation),
        Discard(DiscardDesignation),
        Parenthesized(ParenthesizedVariableDesignation),
    }

    Stmt {
        Block(Block),
        LocalDeclaration(LocalDeclarationStmt),
        Expression(ExpressionStmt),
        Empty(EmptyStmt),
        Labeled(LabeledStmt),
        Goto(GotoStmt),
        Break(BreakStmt),
        Continue(ContinueStmt),
        Return(ReturnStmt),
        Throw(ThrowStmt),
        YieldReturn(YieldReturnStmt),
        YieldBreak(YieldBreakStmt),
        While(WhileStmt),
        Do(DoStmt),
        For(ForStmt),
        ForEach(ForEachStmt),
        ForEachVariable(ForEachVariableStmt),
        Using(UsingStmt),
        Fixed(FixedStmt),
        Checked(CheckedStmt),
        Unsafe(UnsafeStmt),
        Lock(LockStmt),
        If(IfStmt),
        Switch(SwitchStmt),
        Try(TryStmt),
        LocalFunction(LocalFunctionStmt),
    }
}

fn child<'a, N: AstNode<'a>>(parent: SyntaxNode<'a>) -> Option<N> {
    parent.child_nodes().find_map(N::cast)
}

fn children<'a, N: AstNode<'a> + 'a>(parent: SyntaxNode<'a>) -> impl Iterator<Item = N> + 'a {
    parent.child_nodes().filter_map(N::cast)
}

fn nth_child<'a, N: AstNode<'a>>(parent: SyntaxNode<'a>, n: usize) -> Option<N> {
    parent.child_nodes().filter_map(N::cast).nth(n)
}

fn first_token_of<'a>(parent: SyntaxNode<'a>, kinds: &[SyntaxKind]) -> Option<SyntaxToken<'a>> {
    parent.child_tokens().find(|token| kinds.contains(&token.kind()))
}

impl<'a> CompilationUnit<'a> {
    pub fn members(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.0.child_nodes()
    }

    pub fn statements(self) -> impl Iterator<Item = Stmt<'a>> + 'a {
        children::<GlobalStatement<'a>>(self.0).filter_map(GlobalStatement::statement)
    }
}

impl<'a> GlobalStatement<'a> {
    pub fn statement(self) -> Option<Stmt<'a>> {
        child(self.0)
    }
}

impl<'a> IdentifierName<'a> {
    pub fn ident(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().next()
    }
}

impl<'a> TupleType<'a> {
    pub fn elements(self) -> impl Iterator<Item = TupleElement<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> TupleElement<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        child(self.0)
    }

    pub fn name(self) -> Option<SyntaxToken<'a>> {
        self.0.child_token(IDENT)
    }
}

impl<'a> NullableType<'a> {
    pub fn element_type(self) -> Option<Type<'a>> {
        child(self.0)
    }
}

impl<'a> ArrayType<'a> {
    pub fn element_type(self) -> Option<Type<'a>> {
        child(self.0)
    }
}

impl<'a> RefType<'a> {
    pub fn is_readonly(self) -> bool {
        self.0.child_token(READONLY_KW).is_some()
    }

    pub fn ty(self) -> Option<Type<'a>> {
        child(self.0)
    }
}

impl<'a> ParenthesizedExpr<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        child(self.0)
    }
}

impl<'a> TupleExpr<'a> {
    pub fn arguments(self) -> impl Iterator<Item = Argument<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Argument<'a> {
    pub fn name(self) -> Option<SyntaxToken<'a>> {
        self.0
            .child_nodes()
            .find(|node| node.kind() == NAME_COLON)
            .and_then(|name_colon| name_colon.descendants().find_map(|node| node.child_token(IDENT)))
    }

    pub fn ref_kind(self) -> Option<SyntaxToken<'a>> {
        first_token_of(self.0, &[REF_KW, OUT_KW, IN_KW])
    }

    pub fn expr(self) -> Option<Expr<'a>> {
        child(self.0)
    }
}

impl<'a> BinaryExpr<'a> {
    pub fn lhs(self) -> Option<Expr<'a>> {
        nth_child(self.0, 0)
    }

    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().next()
    }

    /// Right operand; a type for `is` and `as`.
    pub fn rhs(self) -> Option<SyntaxNode<'a>> {
        self.0.child_nodes().nth(1)
    }
}

impl<'a> AssignmentExpr<'a> {
    pub fn lhs(self) -> Option<Expr<'a>> {
        nth_child(self.0, 0)
    }

    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.child_tokens().next()
    }

    pub fn rhs(self) -> Option<Expr<'a>> {
        nth_child(self.0, 1)
    }
}

impl<'a> ConditionalExpr<'a> {
    pub fn condition(self) -> Option<Expr<'a>> {
        nth_child(self.0, 0)
    }

    pub fn when_true(self) -> Option<Expr<'a>> {
        nth_child(self.0, 1)
    }

    pub fn when_false(self) -> Option<Expr<'a>> {
        nth_child(self.0, 2)
    }
}

impl<'a> CastExpr<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        child(self.0)
    }

    pub fn expr(self) -> Option<Expr<'a>> {
        nth_child(self.0, 1)
    }
}

impl<'a> InvocationExpr<'a> {
    pub fn callee(self) -> Option<Expr<'a>> {
        child(self.0)
    }

    pub fn arguments(self) -> impl Iterator<Item = Argument<'a>> + 'a {
        self.0
            .child_nodes()
            .filter(|node| node.kind() == ARGUMENT_LIST)
            .flat_map(children::<Argument<'a>>)
    }
}

impl<'a> MemberAccessExpr<'a> {
    pub fn receiver(self) -> Option<Expr<'a>> {
        nth_child(self.0, 0)
    }

    pub fn name(self) -> Option<SyntaxNode<'a>> {
        self.0.child_nodes().nth(1)
    }
}

impl<'a> ParenLambdaExpr<'a> {
    pub fn modifiers(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.0.child_tokens().filter(|token| matches!(token.kind(), ASYNC_KW | STATIC_KW))
    }

    /// Explicit return type, if the lambda spells one out.
    pub fn return_type(self) -> Option<Type<'a>> {
        self.0.child_nodes().take_while(|node| node.kind() != PARAMETER_LIST).find_map(Type::cast)
    }

    pub fn parameter_list(self) -> Option<ParameterList<'a>> {
        child(self.0)
    }

    pub fn body(self) -> Option<SyntaxNode<'a>> {
        self.0.child_nodes().skip_while(|node| node.kind() != PARAMETER_LIST).nth(1)
    }
}

impl<'a> SimpleLambdaExpr<'a> {
    pub fn parameter(self) -> Option<Parameter<'a>> {
        child(self.0)
    }

    pub fn body(self) -> Option<SyntaxNode<'a>> {
        self.0.child_nodes().skip_while(|node| node.kind() != PARAMETER).nth(1)
    }
}

impl<'a> ParameterList<'a> {
    pub fn parameters(self) -> impl Iterator<Item = Parameter<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Parameter<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        child(self.0)
    }

    pub fn name(self) -> Option<SyntaxToken<'a>> {
        self.0.child_token(IDENT)
    }
}

impl<'a> DeclarationExpr<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        child(self.0)
    }

    pub fn designation(self) -> Option<VariableDesignation<'a>> {
        child(self.0)
    }
}

impl<'a> IsPatternExpr<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        child(self.0)
    }

    pub fn pattern(self) -> Option<Pattern<'a>> {
        child(self.0)
    }
}

impl<'a> SwitchExpr<'a> {
    pub fn governing_expr(self) -> Option<Expr<'a>> {
        child(self.0)
    }

    pub fn arms(self) -> impl Iterator<Item = SwitchExprArm<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> SwitchExprArm<'a> {
    pub fn pattern(self) -> Option<Pattern<'a>> {
        child(self.0)
    }

    pub fn expr(self) -> Option<Expr<'a>> {
        child(self.0)
    }
}

impl<'a> RecursivePattern<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        child(self.0)
    }

    pub fn property_clause(self) -> Option<PropertyPatternClause<'a>> {
        child(self.0)
    }
}

impl<'a> PropertyPatternClause<'a> {
    pub fn subpatterns(self) -> impl Iterator<Item = Subpattern<'a>> + 'a {
        children(self.0)
    }

    pub fn r_brace(self) -> Option<SyntaxToken<'a>> {
        self.0.child_token(R_BRACE)
    }
}

impl<'a> LocalDeclarationStmt<'a> {
    pub fn modifiers(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.0.child_tokens().filter(|token| token.kind() != SEMICOLON)
    }

    pub fn declaration(self) -> Option<VariableDeclaration<'a>> {
        child(self.0)
    }
}

impl<'a> VariableDeclaration<'a> {
    pub fn ty(self) -> Option<Type<'a>> {
        child(self.0)
    }

    pub fn declarators(self) -> impl Iterator<Item = VariableDeclarator<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> VariableDeclarator<'a> {
    pub fn name(self) -> Option<SyntaxToken<'a>> {
        self.0.child_token(IDENT)
    }
}

impl<'a> ExpressionStmt<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        child(self.0)
    }
}

impl<'a> UsingStmt<'a> {
    pub fn await_token(self) -> Option<SyntaxToken<'a>> {
        self.0.child_token(AWAIT_KW)
    }

    pub fn declaration(self) -> Option<VariableDeclaration<'a>> {
        child(self.0)
    }
}

impl<'a> ForEachVariableStmt<'a> {
    pub fn variable(self) -> Option<Expr<'a>> {
        child(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, GreenToken, GreenTrivia};

    fn token(builder: &mut Builder, kind: SyntaxKind, text: &str) {
        builder.token(GreenToken::new(kind, text, GreenTrivia::empty(), GreenTrivia::empty(), Vec::new()));
    }

    fn name(builder: &mut Builder, text: &str) {
        builder.start_node(IDENTIFIER_NAME);
        token(builder, IDENT, text);
        builder.finish_node();
    }

    #[test]
    fn conditional_operands() {
        let mut builder = Builder::new();
        builder.start_node(CONDITIONAL_EXPR);
        name(&mut builder, "a");
        token(&mut builder, QUESTION, "?");
        name(&mut builder, "b");
        token(&mut builder, COLON, ":");
        name(&mut builder, "c");
        builder.finish_node();
        let green = builder.finish();

        let expr = Expr::cast(SyntaxNode::new_root(&green)).unwrap();
        let Expr::Conditional(conditional) = expr else { panic!("expected conditional, got {expr:?}") };

        let text = |expr: Option<Expr<'_>>| expr.unwrap().syntax().text();
        assert_eq!(text(conditional.condition()), "a");
        assert_eq!(text(conditional.when_true()), "b");
        assert_eq!(text(conditional.when_false()), "c");
    }

    #[test]
    fn closed_enums_reject_foreign_kinds() {
        let mut builder = Builder::new();
        builder.start_node(BLOCK);
        token(&mut builder, L_BRACE, "{");
        token(&mut builder, R_BRACE, "}");
        builder.finish_node();
        let green = builder.finish();
        let root = SyntaxNode::new_root(&green);

        assert!(Expr::cast(root).is_none());
        assert!(Pattern::cast(root).is_none());
        assert!(matches!(Stmt::cast(root), Some(Stmt::Block(_))));
        assert!(Type::can_cast(TUPLE_TYPE));
        assert!(!Type::can_cast(TUPLE_EXPR));
    }
}
