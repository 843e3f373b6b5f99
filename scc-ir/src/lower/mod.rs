//! AST to IR lowering
//!
//! Drives the translation of a type-checked translation unit into a
//! [`Code`] bundle. A pre-pass records every function signature and
//! lowers the globals so bodies can reference them in any order; each
//! function body is then lowered into its own control-flow graph of
//! basic blocks.

pub use errors::CodegenError;

use crate::ir::{
    Code, Function, FunctionBuilder, FunctionDecl, Instruction, IrType, Opcode, Operand,
};
use frames::FrameStack;
use log::debug;
use scc_ast::{
    ExprKind, FunctionDefinition, Initializer, InitializerKind, Prototype, TopLevelItem,
    TranslationUnit, Type,
};
use scc_common::{CompilerError, GlobalId, SourceSpan};
use scopes::Scopes;
use std::collections::HashMap;

mod binary;
mod casts;
mod errors;
mod expressions;
mod frames;
mod scopes;
mod statements;
mod types;
mod unary;


/// Lowers a whole unit with a fresh engine.
pub fn lower_translation_unit(unit: &TranslationUnit) -> Result<Code, CompilerError> {
    Lowering::new().run(unit)
}

/// Signature of a function as call lowering sees it.
#[derive(Debug, Clone)]
struct Signature {
    return_type: IrType,
    param_types: Vec<IrType>,
    has_body: bool,
}

/// Lowers a type-checked translation unit into IR.
#[derive(Debug, Default)]
pub struct Lowering {
    signatures: HashMap<String, Signature>,
    /// Call targets in first-call order; consulted once at the end to
    /// emit declarations for functions that never got a body.
    called: Vec<String>,
    globals: HashMap<String, Operand>,
    next_global: GlobalId,
    code: Code,
}

impl Lowering {
    pub fn new() -> Self {
        Lowering::default()
    }

    pub fn run(mut self, unit: &TranslationUnit) -> Result<Code, CompilerError> {
        debug!(
            "Lowering translation unit with {} top-level items",
            unit.items.len()
        );

        // Signatures and globals first, so calls and global references
        // resolve regardless of item order.
        for item in &unit.items {
            match item {
                TopLevelItem::Function(function) => self.record_function(function)?,
                TopLevelItem::Prototype(prototype) => self.record_prototype(prototype)?,
                TopLevelItem::Global {
                    name,
                    var_type,
                    initializer,
                    span,
                } => self.lower_global(name, var_type, initializer.as_ref(), span)?,
            }
        }

        for function in unit.functions() {
            let lowered = self.lower_function(function)?;
            self.code.functions.push(lowered);
        }

        let Lowering {
            signatures,
            called,
            mut code,
            ..
        } = self;
        for name in called {
            if let Some(signature) = signatures.get(&name) {
                if !signature.has_body {
                    code.declarations.push(FunctionDecl {
                        name: name.clone(),
                        return_type: signature.return_type.clone(),
                        param_types: signature.param_types.clone(),
                    });
                }
            }
        }
        Ok(code)
    }

    fn record_function(&mut self, function: &FunctionDefinition) -> Result<(), CompilerError> {
        let return_type = types::lower_type(&function.return_type, &function.span)?;
        let mut param_types = Vec::with_capacity(function.parameters.len());
        for (_, param_type) in &function.parameters {
            param_types.push(types::lower_param_type(param_type, &function.span)?);
        }
        self.signatures.insert(
            function.name.clone(),
            Signature {
                return_type,
                param_types,
                has_body: true,
            },
        );
        Ok(())
    }

    fn record_prototype(&mut self, prototype: &Prototype) -> Result<(), CompilerError> {
        let return_type = types::lower_type(&prototype.return_type, &prototype.span)?;
        let mut param_types = Vec::with_capacity(prototype.parameters.len());
        for param_type in &prototype.parameters {
            param_types.push(types::lower_param_type(param_type, &prototype.span)?);
        }
        // A definition anywhere in the unit wins over the prototype.
        self.signatures
            .entry(prototype.name.clone())
            .or_insert(Signature {
                return_type,
                param_types,
                has_body: false,
            });
        Ok(())
    }

    fn lower_global(
        &mut self,
        name: &str,
        var_type: &Type,
        initializer: Option<&Initializer>,
        span: &SourceSpan,
    ) -> Result<(), CompilerError> {
        let value_ty = types::lower_type(var_type, span)?;
        if value_ty.is_void() {
            return Err(CodegenError::InvalidType {
                ast_type: var_type.clone(),
                message: "variables cannot have void type".to_string(),
                location: span.start.clone(),
            }
            .into());
        }
        let id = self.next_global;
        self.next_global += 1;
        let register = Operand::global(id, value_ty.pointer_to());

        let mut operands = vec![register.clone()];
        if let Some(initializer) = initializer {
            collect_global_init(initializer, &value_ty, &mut operands)?;
        }
        self.code
            .globals
            .push(Instruction::new(Opcode::Global, operands));
        self.globals.insert(name.to_string(), register);
        debug!("Lowered global '{}' as @{}", name, id);
        Ok(())
    }

    fn lower_function(&mut self, function: &FunctionDefinition) -> Result<Function, CompilerError> {
        debug!("Lowering function '{}'", function.name);
        let return_type = types::lower_type(&function.return_type, &function.span)?;
        let mut builder = FunctionBuilder::new(&function.name, return_type.clone());
        let mut scopes = Scopes::with_globals(self.globals.clone());
        // Parameters live in the function's own layer, below any body
        // compound.
        scopes.push_layer();
        for (param_name, param_type) in &function.parameters {
            let value_ty = types::lower_param_type(param_type, &function.span)?;
            let argument = builder.add_parameter(value_ty.clone());
            let slot = builder.add_named(param_name, &value_ty);
            builder.build_alloc(slot.clone());
            builder.build_store(argument, slot.clone());
            scopes.bind(param_name, slot);
        }

        let mut lowering = FuncLowering {
            signatures: &self.signatures,
            called: &mut self.called,
            builder,
            scopes,
            frames: FrameStack::new(),
            return_type,
        };
        let terminated = lowering.lower_stmt(&function.body)?;
        if !terminated {
            // Fallthrough off the end of the body returns void.
            lowering.builder.build_return(Operand::Void);
        }
        Ok(lowering.builder.finish())
    }
}

/// Per-function lowering state: the graph under construction plus the
/// lexical environment the statements see.
pub(crate) struct FuncLowering<'a> {
    signatures: &'a HashMap<String, Signature>,
    called: &'a mut Vec<String>,
    builder: FunctionBuilder,
    scopes: Scopes,
    frames: FrameStack,
    return_type: IrType,
}

/// Flattens a constant initializer row-major into `out`. Partial lists
/// pad with zeros so every element keeps its position for the emitter.
fn collect_global_init(
    initializer: &Initializer,
    slot_ty: &IrType,
    out: &mut Vec<Operand>,
) -> Result<(), CompilerError> {
    match &initializer.kind {
        InitializerKind::Expression(expr) => {
            if !slot_ty.dims.is_empty() {
                return Err(CodegenError::internal(
                    "scalar initializer for an array slot".to_string(),
                    initializer.span.start.clone(),
                )
                .into());
            }
            let ExprKind::IntLiteral { value, .. } = &expr.kind else {
                return Err(CodegenError::NonConstantGlobalInitializer {
                    location: expr.span.start.clone(),
                }
                .into());
            };
            out.push(Operand::immediate(*value, slot_ty.clone()));
            Ok(())
        }
        InitializerKind::List(items) => {
            let Some(dim) = slot_ty.dims.first().copied() else {
                return Err(CodegenError::internal(
                    "list initializer for a scalar slot".to_string(),
                    initializer.span.start.clone(),
                )
                .into());
            };
            if items.len() as u64 > dim {
                return Err(CodegenError::internal(
                    format!("{} initializers for {} elements", items.len(), dim),
                    initializer.span.start.clone(),
                )
                .into());
            }
            let Some(element_ty) = slot_ty.without_outer_dim() else {
                return Err(CodegenError::internal(
                    "initializer slot lost its dimensions".to_string(),
                    initializer.span.start.clone(),
                )
                .into());
            };
            for item in items {
                collect_global_init(item, &element_ty, out)?;
            }
            let missing = dim - items.len() as u64;
            if missing > 0 {
                let scalars: u64 = element_ty.dims.iter().product();
                let zero_ty = IrType {
                    dims: Vec::new(),
                    ..element_ty.clone()
                };
                for _ in 0..missing * scalars {
                    out.push(Operand::immediate(0, zero_ty.clone()));
                }
            }
            Ok(())
        }
    }
}
