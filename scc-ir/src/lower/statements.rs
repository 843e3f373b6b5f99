//! Statement lowering
//!
//! Every statement reports whether control can fall out of it. Compound
//! lowering stops at the first statement that cannot fall through, and
//! the function driver uses the body's report to decide whether an
//! implicit void return is needed.

use super::errors::CodegenError;
use super::expressions::AccessMode;
use super::frames::LoopFrame;
use super::types::lower_type;
use super::FuncLowering;
use crate::ir::{IrType, Operand};
use log::trace;
use scc_ast::{Expr, Initializer, InitializerKind, Stmt, StmtKind, Type};
use scc_common::{CompilerError, SourceSpan};

impl FuncLowering<'_> {
    /// Lowers one statement. Reports true when control cannot fall out
    /// of it, i.e. every path through it ends in return, break or
    /// continue.
    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) -> Result<bool, CompilerError> {
        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.lower_expr(expr, AccessMode::Load)?;
                Ok(false)
            }
            StmtKind::Compound(stmts) => self.lower_compound(stmts),
            StmtKind::Declaration {
                name,
                decl_type,
                initializer,
            } => {
                self.lower_declaration(name, decl_type, initializer.as_ref(), &stmt.span)?;
                Ok(false)
            }
            StmtKind::If {
                condition,
                then_stmt,
                else_stmt,
            } => self.lower_if(condition, then_stmt.as_deref(), else_stmt.as_deref()),
            StmtKind::While { condition, body } => self.lower_while(condition, body),
            StmtKind::DoWhile { body, condition } => self.lower_do_while(body, condition),
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => self.lower_for(init.as_deref(), condition.as_ref(), update.as_ref(), body),
            StmtKind::Return(value) => self.lower_return(value.as_ref(), &stmt.span),
            StmtKind::Break => self.lower_break(&stmt.span),
            StmtKind::Continue => self.lower_continue(&stmt.span),
            StmtKind::Empty => Ok(false),
        }
    }

    fn lower_compound(&mut self, stmts: &[Stmt]) -> Result<bool, CompilerError> {
        self.scopes.push_layer();
        let mut terminated = false;
        for stmt in stmts {
            if self.lower_stmt(stmt)? {
                // Everything after this statement is unreachable.
                terminated = true;
                break;
            }
        }
        self.scopes.pop_layer();
        Ok(terminated)
    }

    fn lower_declaration(
        &mut self,
        name: &str,
        decl_type: &Type,
        initializer: Option<&Initializer>,
        span: &SourceSpan,
    ) -> Result<(), CompilerError> {
        trace!("Declaring '{}'", name);
        let value_ty = lower_type(decl_type, span)?;
        if value_ty.is_void() {
            return Err(CodegenError::InvalidType {
                ast_type: decl_type.clone(),
                message: "variables cannot have void type".to_string(),
                location: span.start.clone(),
            }
            .into());
        }
        let slot = self.builder.add_named(name, &value_ty);
        self.builder.build_alloc(slot.clone());
        self.scopes.bind(name, slot.clone());
        if let Some(initializer) = initializer {
            self.lower_init_into(slot, initializer)?;
        }
        Ok(())
    }

    /// Writes an initializer through `addr`. Scalar slots store a
    /// converted value; array slots recurse element by element, each
    /// address reached by an index-at with a leading zero. Elements the
    /// list leaves out keep whatever the slot held.
    fn lower_init_into(
        &mut self,
        addr: Operand,
        initializer: &Initializer,
    ) -> Result<(), CompilerError> {
        let Some(value_ty) = addr.ty().and_then(IrType::dereferenced) else {
            return Err(CodegenError::internal(
                "initializer target is not an address".to_string(),
                initializer.span.start.clone(),
            )
            .into());
        };
        match &initializer.kind {
            InitializerKind::Expression(expr) => {
                if !value_ty.dims.is_empty() {
                    return Err(CodegenError::internal(
                        "scalar initializer for an array slot".to_string(),
                        initializer.span.start.clone(),
                    )
                    .into());
                }
                let value = self.lower_expr(expr, AccessMode::Load)?;
                let value = self.implicit_cast(value, &value_ty, &initializer.span)?;
                self.builder.build_store(value, addr);
            }
            InitializerKind::List(items) => {
                let Some(dim) = value_ty.dims.first().copied() else {
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
                let Some(element_addr_ty) = addr.ty().and_then(IrType::without_outer_dim) else {
                    return Err(CodegenError::internal(
                        "initializer slot lost its dimensions".to_string(),
                        initializer.span.start.clone(),
                    )
                    .into());
                };
                for (index, item) in items.iter().enumerate() {
                    let element_addr = self.builder.build_index_at(
                        addr.clone(),
                        vec![
                            Operand::immediate(0, IrType::I64),
                            Operand::immediate(index as i64, IrType::I64),
                        ],
                        element_addr_ty.clone(),
                    );
                    self.lower_init_into(element_addr, item)?;
                }
            }
        }
        Ok(())
    }

    fn lower_if(
        &mut self,
        condition: &Expr,
        then_stmt: Option<&Stmt>,
        else_stmt: Option<&Stmt>,
    ) -> Result<bool, CompilerError> {
        let cond = self.lower_expr(condition, AccessMode::Load)?;
        match (then_stmt, else_stmt) {
            // No branch at all: the condition was lowered for its side
            // effects and the branch is dropped.
            (None, None) => Ok(false),
            (Some(then_branch), None) => {
                let then_block = self.builder.add_block("if.then");
                let join = self.builder.add_block("if.end");
                let from = self.builder.current_block();
                if self.builder.build_branch(cond, then_block, join) {
                    self.builder.add_predecessor(then_block, from);
                    self.builder.add_predecessor(join, from);
                }

                self.builder.select_block(then_block);
                self.scopes.push_layer();
                self.lower_stmt(then_branch)?;
                self.scopes.pop_layer();
                let end = self.builder.current_block();
                if self.builder.build_jump(join) {
                    self.builder.add_predecessor(join, end);
                }
                self.builder.select_block(join);
                Ok(false)
            }
            (None, Some(else_branch)) => {
                let else_block = self.builder.add_block("if.else");
                let join = self.builder.add_block("if.end");
                let from = self.builder.current_block();
                if self.builder.build_branch(cond, join, else_block) {
                    self.builder.add_predecessor(join, from);
                    self.builder.add_predecessor(else_block, from);
                }

                self.builder.select_block(else_block);
                self.scopes.push_layer();
                self.lower_stmt(else_branch)?;
                self.scopes.pop_layer();
                let end = self.builder.current_block();
                if self.builder.build_jump(join) {
                    self.builder.add_predecessor(join, end);
                }
                self.builder.select_block(join);
                Ok(false)
            }
            (Some(then_branch), Some(else_branch)) => {
                let then_block = self.builder.add_block("if.then");
                let else_block = self.builder.add_block("if.else");
                let from = self.builder.current_block();
                if self.builder.build_branch(cond, then_block, else_block) {
                    self.builder.add_predecessor(then_block, from);
                    self.builder.add_predecessor(else_block, from);
                }

                self.builder.select_block(then_block);
                self.scopes.push_layer();
                let then_terminates = self.lower_stmt(then_branch)?;
                self.scopes.pop_layer();
                let then_end = self.builder.current_block();

                self.builder.select_block(else_block);
                self.scopes.push_layer();
                let else_terminates = self.lower_stmt(else_branch)?;
                self.scopes.pop_layer();
                let else_end = self.builder.current_block();

                if then_terminates && else_terminates {
                    // Neither arm falls through, so there is no join.
                    return Ok(true);
                }
                let join = self.builder.add_block("if.end");
                self.builder.select_block(then_end);
                if self.builder.build_jump(join) {
                    self.builder.add_predecessor(join, then_end);
                }
                self.builder.select_block(else_end);
                if self.builder.build_jump(join) {
                    self.builder.add_predecessor(join, else_end);
                }
                self.builder.select_block(join);
                Ok(false)
            }
        }
    }

    fn lower_while(&mut self, condition: &Expr, body: &Stmt) -> Result<bool, CompilerError> {
        let cond_block = self.builder.add_block("while.cond");
        let body_block = self.builder.add_block("while.body");
        let next_block = self.builder.add_block("while.end");

        let from = self.builder.current_block();
        if self.builder.build_jump(cond_block) {
            self.builder.add_predecessor(cond_block, from);
        }

        self.builder.select_block(cond_block);
        let cond = self.lower_expr(condition, AccessMode::Load)?;
        let cond_end = self.builder.current_block();
        if self.builder.build_branch(cond, body_block, next_block) {
            self.builder.add_predecessor(body_block, cond_end);
            self.builder.add_predecessor(next_block, cond_end);
        }

        self.frames.push(LoopFrame {
            next: next_block,
            continue_target: cond_block,
        });
        self.builder.select_block(body_block);
        self.scopes.push_layer();
        self.lower_stmt(body)?;
        self.scopes.pop_layer();
        self.frames.pop();

        let body_end = self.builder.current_block();
        if self.builder.build_jump(cond_block) {
            self.builder.add_predecessor(cond_block, body_end);
        }
        self.builder.select_block(next_block);
        Ok(false)
    }

    fn lower_do_while(&mut self, body: &Stmt, condition: &Expr) -> Result<bool, CompilerError> {
        let body_block = self.builder.add_block("do.body");
        let cond_block = self.builder.add_block("do.cond");
        let next_block = self.builder.add_block("do.end");

        let from = self.builder.current_block();
        if self.builder.build_jump(body_block) {
            self.builder.add_predecessor(body_block, from);
        }

        self.frames.push(LoopFrame {
            next: next_block,
            continue_target: cond_block,
        });
        self.builder.select_block(body_block);
        self.scopes.push_layer();
        self.lower_stmt(body)?;
        self.scopes.pop_layer();
        self.frames.pop();

        let body_end = self.builder.current_block();
        if self.builder.build_jump(cond_block) {
            self.builder.add_predecessor(cond_block, body_end);
        }

        self.builder.select_block(cond_block);
        let cond = self.lower_expr(condition, AccessMode::Load)?;
        let cond_end = self.builder.current_block();
        if self.builder.build_branch(cond, body_block, next_block) {
            self.builder.add_predecessor(body_block, cond_end);
            self.builder.add_predecessor(next_block, cond_end);
        }
        self.builder.select_block(next_block);
        Ok(false)
    }

    fn lower_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        update: Option<&Expr>,
        body: &Stmt,
    ) -> Result<bool, CompilerError> {
        // Declarations in the init clause scope to the loop.
        self.scopes.push_layer();
        if let Some(init_stmt) = init {
            if self.lower_stmt(init_stmt)? {
                self.scopes.pop_layer();
                return Ok(true);
            }
        }

        // A missing condition makes the body the loop header; a missing
        // update makes the header the continue target.
        let cond_block = condition.map(|_| self.builder.add_block("for.cond"));
        let body_block = self.builder.add_block("for.body");
        let incr_block = update.map(|_| self.builder.add_block("for.inc"));
        let next_block = self.builder.add_block("for.end");
        let header = cond_block.unwrap_or(body_block);
        let continue_target = incr_block.unwrap_or(header);

        let from = self.builder.current_block();
        if self.builder.build_jump(header) {
            self.builder.add_predecessor(header, from);
        }

        if let (Some(block), Some(cond_expr)) = (cond_block, condition) {
            self.builder.select_block(block);
            let cond = self.lower_expr(cond_expr, AccessMode::Load)?;
            let cond_end = self.builder.current_block();
            if self.builder.build_branch(cond, body_block, next_block) {
                self.builder.add_predecessor(body_block, cond_end);
                self.builder.add_predecessor(next_block, cond_end);
            }
        }

        self.frames.push(LoopFrame {
            next: next_block,
            continue_target,
        });
        self.builder.select_block(body_block);
        self.scopes.push_layer();
        self.lower_stmt(body)?;
        self.scopes.pop_layer();
        self.frames.pop();

        let body_end = self.builder.current_block();
        if self.builder.build_jump(continue_target) {
            self.builder.add_predecessor(continue_target, body_end);
        }

        if let (Some(block), Some(update_expr)) = (incr_block, update) {
            self.builder.select_block(block);
            self.lower_expr(update_expr, AccessMode::Load)?;
            let incr_end = self.builder.current_block();
            if self.builder.build_jump(header) {
                self.builder.add_predecessor(header, incr_end);
            }
        }

        self.builder.select_block(next_block);
        self.scopes.pop_layer();
        Ok(false)
    }

    fn lower_return(
        &mut self,
        value: Option<&Expr>,
        span: &SourceSpan,
    ) -> Result<bool, CompilerError> {
        let operand = match value {
            Some(expr) => {
                let lowered = self.lower_expr(expr, AccessMode::Load)?;
                let return_type = self.return_type.clone();
                self.implicit_cast(lowered, &return_type, span)?
            }
            None => Operand::Void,
        };
        self.builder.build_return(operand);
        Ok(true)
    }

    fn lower_break(&mut self, span: &SourceSpan) -> Result<bool, CompilerError> {
        let Some(frame) = self.frames.innermost() else {
            return Err(CodegenError::InvalidBreak {
                location: span.start.clone(),
            }
            .into());
        };
        let from = self.builder.current_block();
        if self.builder.build_jump(frame.next) {
            self.builder.add_predecessor(frame.next, from);
        }
        Ok(true)
    }

    fn lower_continue(&mut self, span: &SourceSpan) -> Result<bool, CompilerError> {
        let Some(frame) = self.frames.innermost() else {
            return Err(CodegenError::InvalidContinue {
                location: span.start.clone(),
            }
            .into());
        };
        let from = self.builder.current_block();
        if self.builder.build_jump(frame.continue_target) {
            self.builder.add_predecessor(frame.continue_target, from);
        }
        Ok(true)
    }
}
