//! Cursor and type kinds, numbered the way the front-end numbers them.

use std::borrow::Cow;

macro_rules! raw_kinds {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident = $raw:literal => $spelling:literal,)* }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
            /// A code this crate does not name
            Other(i32),
        }

        impl $name {
            /// Map a raw front-end code onto a kind.
            pub fn from_raw(raw: i32) -> Self {
                match raw {
                    $($raw => Self::$variant,)*
                    other => Self::Other(other),
                }
            }

            /// The raw front-end code of this kind.
            pub fn raw(self) -> i32 {
                match self {
                    $(Self::$variant => $raw,)*
                    Self::Other(raw) => raw,
                }
            }

            /// The front-end's spelling of this kind.
            pub fn spelling(self) -> Cow<'static, str> {
                match self {
                    $(Self::$variant => Cow::Borrowed($spelling),)*
                    Self::Other(raw) => Cow::Owned(format!("Unknown({})", raw)),
                }
            }
        }
    };
}

raw_kinds! {
    /// Kind of an AST cursor.
    pub enum CursorKind {
        UnexposedDecl = 1 => "UnexposedDecl",
        StructDecl = 2 => "StructDecl",
        UnionDecl = 3 => "UnionDecl",
        ClassDecl = 4 => "ClassDecl",
        EnumDecl = 5 => "EnumDecl",
        FieldDecl = 6 => "FieldDecl",
        EnumConstantDecl = 7 => "EnumConstantDecl",
        FunctionDecl = 8 => "FunctionDecl",
        VarDecl = 9 => "VarDecl",
        ParmDecl = 10 => "ParmDecl",
        TypedefDecl = 20 => "TypedefDecl",
        CXXMethod = 21 => "CXXMethod",
        Namespace = 22 => "Namespace",
        LinkageSpec = 23 => "LinkageSpec",
        Constructor = 24 => "CXXConstructor",
        Destructor = 25 => "CXXDestructor",
        ConversionFunction = 26 => "CXXConversion",
        TemplateTypeParameter = 27 => "TemplateTypeParameter",
        NonTypeTemplateParameter = 28 => "NonTypeTemplateParameter",
        TemplateTemplateParameter = 29 => "TemplateTemplateParameter",
        FunctionTemplate = 30 => "FunctionTemplate",
        ClassTemplate = 31 => "ClassTemplate",
        ClassTemplatePartialSpecialization = 32 => "ClassTemplatePartialSpecialization",
        NamespaceAlias = 33 => "NamespaceAlias",
        UsingDirective = 34 => "UsingDirective",
        UsingDeclaration = 35 => "UsingDeclaration",
        TypeAliasDecl = 36 => "TypeAliasDecl",
        CXXAccessSpecifier = 39 => "CXXAccessSpecifier",
        TypeRef = 43 => "TypeRef",
        CXXBaseSpecifier = 44 => "C++ base class specifier",
        TemplateRef = 45 => "TemplateRef",
        NamespaceRef = 46 => "NamespaceRef",
        MemberRef = 47 => "MemberRef",
        LabelRef = 48 => "LabelRef",
        OverloadedDeclRef = 49 => "OverloadedDeclRef",
        VariableRef = 50 => "VariableRef",
        InvalidFile = 70 => "InvalidFile",
        NoDeclFound = 71 => "NoDeclFound",
        NotImplemented = 72 => "NotImplemented",
        InvalidCode = 73 => "InvalidCode",
        UnexposedExpr = 100 => "UnexposedExpr",
        DeclRefExpr = 101 => "DeclRefExpr",
        MemberRefExpr = 102 => "MemberRefExpr",
        CallExpr = 103 => "CallExpr",
        IntegerLiteral = 106 => "IntegerLiteral",
        FloatingLiteral = 107 => "FloatingLiteral",
        StringLiteral = 109 => "StringLiteral",
        CharacterLiteral = 110 => "CharacterLiteral",
        ParenExpr = 111 => "ParenExpr",
        UnaryOperator = 112 => "UnaryOperator",
        ArraySubscriptExpr = 113 => "ArraySubscriptExpr",
        BinaryOperator = 114 => "BinaryOperator",
        CompoundAssignOperator = 115 => "CompoundAssignOperator",
        ConditionalOperator = 116 => "ConditionalOperator",
        CStyleCastExpr = 117 => "CStyleCastExpr",
        InitListExpr = 119 => "InitListExpr",
        CXXStaticCastExpr = 124 => "CXXStaticCastExpr",
        CXXFunctionalCastExpr = 128 => "CXXFunctionalCastExpr",
        CXXBoolLiteralExpr = 130 => "CXXBoolLiteralExpr",
        CXXNullPtrLiteralExpr = 131 => "CXXNullPtrLiteralExpr",
        CXXThisExpr = 132 => "CXXThisExpr",
        CXXThrowExpr = 133 => "CXXThrowExpr",
        CXXNewExpr = 134 => "CXXNewExpr",
        CXXDeleteExpr = 135 => "CXXDeleteExpr",
        LambdaExpr = 144 => "LambdaExpr",
        UnexposedStmt = 200 => "UnexposedStmt",
        LabelStmt = 201 => "LabelStmt",
        CompoundStmt = 202 => "CompoundStmt",
        CaseStmt = 203 => "CaseStmt",
        DefaultStmt = 204 => "DefaultStmt",
        IfStmt = 205 => "IfStmt",
        SwitchStmt = 206 => "SwitchStmt",
        WhileStmt = 207 => "WhileStmt",
        DoStmt = 208 => "DoStmt",
        ForStmt = 209 => "ForStmt",
        GotoStmt = 210 => "GotoStmt",
        ContinueStmt = 212 => "ContinueStmt",
        BreakStmt = 213 => "BreakStmt",
        ReturnStmt = 214 => "ReturnStmt",
        CXXCatchStmt = 223 => "CXXCatchStmt",
        CXXTryStmt = 224 => "CXXTryStmt",
        CXXForRangeStmt = 225 => "CXXForRangeStmt",
        NullStmt = 230 => "NullStmt",
        DeclStmt = 231 => "DeclStmt",
        TranslationUnit = 300 => "TranslationUnit",
        UnexposedAttr = 400 => "UnexposedAttr",
        PreprocessingDirective = 500 => "preprocessing directive",
        MacroDefinition = 501 => "macro definition",
        MacroExpansion = 502 => "macro expansion",
        InclusionDirective = 503 => "inclusion directive",
        ModuleImportDecl = 600 => "ModuleImport",
        TypeAliasTemplateDecl = 601 => "TypeAliasTemplateDecl",
        StaticAssert = 602 => "StaticAssert",
        FriendDecl = 603 => "FriendDecl",
    }
}

/// Coarse classification of a cursor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorCategory {
    Attribute,
    Declaration,
    Expression,
    Invalid,
    Preprocessing,
    Reference,
    Statement,
    TranslationUnit,
    Unexposed,
    Unknown,
}

impl CursorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            CursorCategory::Attribute => "Attribute",
            CursorCategory::Declaration => "Declaration",
            CursorCategory::Expression => "Expression",
            CursorCategory::Invalid => "Invalid",
            CursorCategory::Preprocessing => "Preprocessing",
            CursorCategory::Reference => "Reference",
            CursorCategory::Statement => "Statement",
            CursorCategory::TranslationUnit => "TranslationUnit",
            CursorCategory::Unexposed => "Unexposed",
            CursorCategory::Unknown => "Unknown",
        }
    }
}

impl CursorKind {
    pub fn is_declaration(self) -> bool {
        matches!(self.raw(), 1..=39 | 600..=603)
    }

    pub fn is_reference(self) -> bool {
        matches!(self.raw(), 40..=50)
    }

    pub fn is_expression(self) -> bool {
        matches!(self.raw(), 100..=199)
    }

    pub fn is_statement(self) -> bool {
        matches!(self.raw(), 200..=299)
    }

    pub fn is_attribute(self) -> bool {
        matches!(self.raw(), 400..=499)
    }

    pub fn is_invalid(self) -> bool {
        matches!(self.raw(), 70..=73)
    }

    pub fn is_translation_unit(self) -> bool {
        self == CursorKind::TranslationUnit
    }

    pub fn is_preprocessing(self) -> bool {
        matches!(self.raw(), 500..=503)
    }

    pub fn is_unexposed(self) -> bool {
        matches!(
            self,
            CursorKind::UnexposedDecl
                | CursorKind::UnexposedExpr
                | CursorKind::UnexposedStmt
                | CursorKind::UnexposedAttr
        )
    }

    /// Function-like declarations, including lambdas.
    pub fn is_function(self) -> bool {
        matches!(
            self,
            CursorKind::FunctionDecl
                | CursorKind::CXXMethod
                | CursorKind::Constructor
                | CursorKind::Destructor
                | CursorKind::ConversionFunction
                | CursorKind::FunctionTemplate
                | CursorKind::LambdaExpr
        )
    }

    /// Record-like declarations and their templates.
    pub fn is_class(self) -> bool {
        matches!(
            self,
            CursorKind::StructDecl
                | CursorKind::ClassDecl
                | CursorKind::UnionDecl
                | CursorKind::ClassTemplate
                | CursorKind::ClassTemplatePartialSpecialization
        )
    }

    /// First matching category, checked in a fixed order.
    pub fn category(self) -> CursorCategory {
        if self.is_attribute() {
            CursorCategory::Attribute
        } else if self.is_declaration() {
            CursorCategory::Declaration
        } else if self.is_expression() {
            CursorCategory::Expression
        } else if self.is_invalid() {
            CursorCategory::Invalid
        } else if self.is_preprocessing() {
            CursorCategory::Preprocessing
        } else if self.is_reference() {
            CursorCategory::Reference
        } else if self.is_statement() {
            CursorCategory::Statement
        } else if self.is_translation_unit() {
            CursorCategory::TranslationUnit
        } else if self.is_unexposed() {
            CursorCategory::Unexposed
        } else {
            CursorCategory::Unknown
        }
    }
}

raw_kinds! {
    /// Kind of a type.
    pub enum TypeKind {
        Invalid = 0 => "Invalid",
        Unexposed = 1 => "Unexposed",
        Void = 2 => "Void",
        Bool = 3 => "Bool",
        CharU = 4 => "Char_U",
        UChar = 5 => "UChar",
        UShort = 8 => "UShort",
        UInt = 9 => "UInt",
        ULong = 10 => "ULong",
        ULongLong = 11 => "ULongLong",
        CharS = 13 => "Char_S",
        SChar = 14 => "SChar",
        WChar = 15 => "WChar",
        Short = 16 => "Short",
        Int = 17 => "Int",
        Long = 18 => "Long",
        LongLong = 19 => "LongLong",
        Float = 21 => "Float",
        Double = 22 => "Double",
        LongDouble = 23 => "LongDouble",
        NullPtr = 24 => "NullPtr",
        Overload = 25 => "Overload",
        Dependent = 26 => "Dependent",
        Pointer = 101 => "Pointer",
        LValueReference = 103 => "LValueReference",
        RValueReference = 104 => "RValueReference",
        Record = 105 => "Record",
        Enum = 106 => "Enum",
        Typedef = 107 => "Typedef",
        FunctionNoProto = 110 => "FunctionNoProto",
        FunctionProto = 111 => "FunctionProto",
        ConstantArray = 112 => "ConstantArray",
        IncompleteArray = 114 => "IncompleteArray",
        MemberPointer = 117 => "MemberPointer",
        Auto = 118 => "Auto",
        Elaborated = 119 => "Elaborated",
    }
}

impl TypeKind {
    pub fn is_invalid(self) -> bool {
        self == TypeKind::Invalid
    }
}
