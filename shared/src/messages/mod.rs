pub mod remote_call;
