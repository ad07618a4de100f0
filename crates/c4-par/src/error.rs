//! Fatal compile diagnostics.
//!
//! Every variant but [`CompileError::MainNotDefined`] renders as
//! `"<line>: <message>"`, matching the source compiler's uniform
//! `printf("%d: %s\n", line, msg)` reporting: there is no recovery and no
//! multi-error collection, so the parser returns the first one it hits and
//! the driver prints it and exits `-1`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("{line}: unexpected eof in expression")]
    UnexpectedEof { line: u32 },

    #[error("{line}: bad function call")]
    BadFunctionCall { line: u32 },

    #[error("{line}: undefined variable")]
    UndefinedVariable { line: u32 },

    #[error("{line}: bad cast")]
    BadCast { line: u32 },

    #[error("{line}: close paren expected")]
    CloseParenExpected { line: u32 },

    #[error("{line}: bad dereference")]
    BadDereference { line: u32 },

    #[error("{line}: bad address-of")]
    BadAddressOf { line: u32 },

    #[error("{line}: bad lvalue in pre-increment")]
    BadLvalueInPreIncrement { line: u32 },

    #[error("{line}: bad expression")]
    BadExpression { line: u32 },

    #[error("{line}: bad lvalue in assignment")]
    BadLvalueInAssignment { line: u32 },

    #[error("{line}: conditional missing colon")]
    ConditionalMissingColon { line: u32 },

    #[error("{line}: bad lvalue in post-increment")]
    BadLvalueInPostIncrement { line: u32 },

    #[error("{line}: close bracket expected")]
    CloseBracketExpected { line: u32 },

    #[error("{line}: pointer type expected")]
    PointerTypeExpected { line: u32 },

    #[error("{line}: compiler error tk={tk}")]
    CompilerInternal { line: u32, tk: i32 },

    #[error("{line}: open paren expected")]
    OpenParenExpected { line: u32 },

    #[error("{line}: semicolon expected")]
    SemicolonExpected { line: u32 },

    #[error("{line}: bad enum identifier {tk}")]
    BadEnumIdentifier { line: u32, tk: i32 },

    #[error("{line}: bad enum initializer")]
    BadEnumInitializer { line: u32 },

    #[error("{line}: bad global declaration")]
    BadGlobalDeclaration { line: u32 },

    #[error("{line}: duplicate global definition")]
    DuplicateGlobalDefinition { line: u32 },

    #[error("{line}: bad parameter declaration")]
    BadParameterDeclaration { line: u32 },

    #[error("{line}: duplicate parameter definition")]
    DuplicateParameterDefinition { line: u32 },

    #[error("{line}: bad function definition")]
    BadFunctionDefinition { line: u32 },

    #[error("{line}: bad local declaration")]
    BadLocalDeclaration { line: u32 },

    #[error("{line}: duplicate local definition")]
    DuplicateLocalDefinition { line: u32 },

    /// Not preceded by a line number in the source compiler either — it is
    /// reported once, after parsing has finished, when the symbol table has
    /// no `main` with `Class == Fun`.
    #[error("main() not defined")]
    MainNotDefined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_as_line_colon_message() {
        let err = CompileError::UndefinedVariable { line: 7 };
        assert_eq!(err.to_string(), "7: undefined variable");
    }

    #[test]
    fn main_not_defined_has_no_line_prefix() {
        assert_eq!(CompileError::MainNotDefined.to_string(), "main() not defined");
    }

    #[test]
    fn compiler_internal_embeds_token_code() {
        let err = CompileError::CompilerInternal { line: 3, tk: 42 };
        assert_eq!(err.to_string(), "3: compiler error tk=42");
    }
}
