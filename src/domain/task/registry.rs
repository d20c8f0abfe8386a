//! Task Context - Registry
//!
//! 路径 → 外部任务的固定映射，启动时构建，之后只读

use std::collections::{BTreeMap, HashSet};

use super::{RegistryError, TaskPath, TaskSpec};

/// 任务注册表
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<TaskPath, TaskSpec>,
}

impl TaskRegistry {
    /// 从任务定义构建注册表，路径或名称重复时报错
    pub fn new(specs: impl IntoIterator<Item = TaskSpec>) -> Result<Self, RegistryError> {
        let mut tasks = BTreeMap::new();
        let mut names = HashSet::new();

        for spec in specs {
            if spec.program.trim().is_empty() {
                return Err(RegistryError::EmptyProgram(spec.name));
            }
            if !names.insert(spec.name.clone()) {
                return Err(RegistryError::DuplicateName(spec.name));
            }
            if tasks.contains_key(&spec.path) {
                return Err(RegistryError::DuplicatePath(spec.path));
            }
            tasks.insert(spec.path.clone(), spec);
        }

        Ok(Self { tasks })
    }

    pub fn get(&self, path: &str) -> Option<&TaskSpec> {
        self.tasks.get(path)
    }

    /// 按路径排序遍历
    pub fn iter(&self) -> impl Iterator<Item = &TaskSpec> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
