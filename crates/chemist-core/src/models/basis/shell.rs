use super::ShellType;
use super::contracted_gaussian::{ContractedGaussian, ContractedGaussianView};
use super::primitive::PrimitiveView;
use crate::error::{ChemistError, Result};
use crate::view::{Access, ReadOnly, ReadWrite, RecordView};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contracted Gaussian combined with every angular function of momentum `l`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shell {
    pub shell_type: ShellType,
    pub l: u32,
    pub contracted_gaussian: ContractedGaussian,
}

impl Shell {
    pub fn new(shell_type: ShellType, l: u32, contracted_gaussian: ContractedGaussian) -> Self {
        Self {
            shell_type,
            l,
            contracted_gaussian,
        }
    }

    pub fn n_aos(&self) -> usize {
        self.shell_type.n_aos(self.l)
    }
}

/// Aliases the shell type, angular momentum and contraction of one shell.
pub struct ShellView<'a, M: Access = ReadOnly> {
    shell_type: Option<M::Ref<'a, ShellType>>,
    l: Option<M::Ref<'a, u32>>,
    contracted_gaussian: ContractedGaussianView<'a, M>,
}

impl<'a, M: Access> Default for ShellView<'a, M> {
    fn default() -> Self {
        Self {
            shell_type: None,
            l: None,
            contracted_gaussian: ContractedGaussianView::default(),
        }
    }
}

impl<'a, M: Access> ShellView<'a, M> {
    pub fn new(
        shell_type: M::Ref<'a, ShellType>,
        l: M::Ref<'a, u32>,
        contracted_gaussian: ContractedGaussianView<'a, M>,
    ) -> Self {
        Self {
            shell_type: Some(shell_type),
            l: Some(l),
            contracted_gaussian,
        }
    }

    pub fn shell_type(&self) -> Result<ShellType> {
        self.shell_type
            .as_deref()
            .copied()
            .ok_or(ChemistError::NullView)
    }

    pub fn l(&self) -> Result<u32> {
        self.l.as_deref().copied().ok_or(ChemistError::NullView)
    }

    pub fn n_aos(&self) -> Result<usize> {
        Ok(self.shell_type()?.n_aos(self.l()?))
    }

    pub fn n_primitives(&self) -> usize {
        self.contracted_gaussian.len()
    }

    pub fn contracted_gaussian(&self) -> &ContractedGaussianView<'a, M> {
        &self.contracted_gaussian
    }

    pub fn primitive(&self, index: usize) -> Result<PrimitiveView<'_, ReadOnly>> {
        self.contracted_gaussian.at(index)
    }

    pub fn primitive_mut(&mut self, index: usize) -> Result<PrimitiveView<'_, M>> {
        self.contracted_gaussian.at_mut(index)
    }

    pub fn as_const(&self) -> ShellView<'_, ReadOnly> {
        ShellView {
            shell_type: self.shell_type.as_deref(),
            l: self.l.as_deref(),
            contracted_gaussian: self.contracted_gaussian.as_const(),
        }
    }

    pub fn reborrow(&mut self) -> ShellView<'_, M> {
        ShellView {
            shell_type: self.shell_type.as_mut().map(|t| M::reborrow(t)),
            l: self.l.as_mut().map(|l| M::reborrow(l)),
            contracted_gaussian: self.contracted_gaussian.reborrow(),
        }
    }
}

impl<'a> ShellView<'a, ReadWrite> {
    pub fn set_shell_type(&mut self, shell_type: ShellType) -> Result<()> {
        *self.shell_type.as_deref_mut().ok_or(ChemistError::NullView)? = shell_type;
        Ok(())
    }

    pub fn set_l(&mut self, l: u32) -> Result<()> {
        *self.l.as_deref_mut().ok_or(ChemistError::NullView)? = l;
        Ok(())
    }

    pub fn contracted_gaussian_mut(&mut self) -> &mut ContractedGaussianView<'a, ReadWrite> {
        &mut self.contracted_gaussian
    }
}

impl<'a, M: Access> RecordView for ShellView<'a, M> {
    type Record = Shell;

    fn is_null(&self) -> bool {
        self.shell_type.is_none() || self.l.is_none() || self.contracted_gaussian.is_null()
    }

    fn materialize(&self) -> Result<Shell> {
        Ok(Shell::new(
            self.shell_type()?,
            self.l()?,
            self.contracted_gaussian.materialize()?,
        ))
    }
}

impl<'a> From<&'a Shell> for ShellView<'a, ReadOnly> {
    fn from(shell: &'a Shell) -> Self {
        Self::new(
            &shell.shell_type,
            &shell.l,
            ContractedGaussianView::from(&shell.contracted_gaussian),
        )
    }
}

impl<'a> From<&'a mut Shell> for ShellView<'a, ReadWrite> {
    fn from(shell: &'a mut Shell) -> Self {
        let Shell {
            shell_type,
            l,
            contracted_gaussian,
        } = shell;
        Self::new(
            shell_type,
            l,
            ContractedGaussianView::from(contracted_gaussian),
        )
    }
}

impl<'a> Clone for ShellView<'a, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for ShellView<'a, ReadOnly> {}

impl<'a, 'b, M: Access, N: Access> PartialEq<ShellView<'b, N>> for ShellView<'a, M> {
    fn eq(&self, other: &ShellView<'b, N>) -> bool {
        self.shell_type.as_deref() == other.shell_type.as_deref()
            && self.l.as_deref() == other.l.as_deref()
            && self.contracted_gaussian == other.contracted_gaussian
    }
}

impl<'a, M: Access> PartialEq<Shell> for ShellView<'a, M> {
    fn eq(&self, other: &Shell) -> bool {
        *self == ShellView::from(other)
    }
}

impl<'a, M: Access> PartialEq<ShellView<'a, M>> for Shell {
    fn eq(&self, other: &ShellView<'a, M>) -> bool {
        other == self
    }
}

impl<'a, M: Access> fmt::Debug for ShellView<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("ShellView(null)");
        }
        f.debug_struct("ShellView")
            .field("shell_type", &self.shell_type.as_deref())
            .field("l", &self.l.as_deref())
            .field("contracted_gaussian", &self.contracted_gaussian)
            .finish()
    }
}
