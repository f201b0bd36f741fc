pub mod executor;
pub mod processor;
pub mod transport;

pub use executor::{Executor, Task, TaskResult};
pub use processor::{
    ContextProcessor, DataOperation, DataProbe, DataSink, DataSource, ParameterSpec,
    PayloadSink, PayloadSource, Processor, ProcessorInfo, ProcessorKind,
};
pub use transport::{Subscription, Transport};
